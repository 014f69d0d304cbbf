fn main() {
    scheem::cli::run();
}
