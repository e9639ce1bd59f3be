use advent2021::{harness, sonar};

fn main() {
    harness::run(sonar::solve);
}
