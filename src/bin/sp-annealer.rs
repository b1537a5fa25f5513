use sp_placement::solver::annealing::search;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    search::run()
}
