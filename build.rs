fn main() {
    // Propagate the ESP-IDF build environment to dependent crates when
    // cross-compiling with the `espidf` feature. Host builds (tests,
    // fuzzing) have no IDF environment and skip this.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
