use advent2021::{harness, diagnostic};

fn main() {
    harness::run(diagnostic::solve);
}
