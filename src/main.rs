fn main() {
    arkparse::cli::run();
}
