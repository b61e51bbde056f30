fn main() {
    lcars::app::cli::run();
}
