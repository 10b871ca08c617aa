fn main() {
    if let Err(err) = dataset_cleaner::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
