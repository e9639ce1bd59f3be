use advent2021::{harness, dive};

fn main() {
    harness::run(dive::solve);
}
