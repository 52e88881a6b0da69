//! List-checks command - print the registered checks.

use dircheck::validation::all_checks;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    for check in all_checks() {
        println!("{}", check.name());
    }
    Ok(())
}
