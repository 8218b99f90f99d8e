pub fn run(seed: Option<u64>, output_path: Option<&str>) {
    let snapshot = super::make_generator(seed).generate();
    match output_path {
        Some(path) => super::write_json(&snapshot, path, "Snapshot"),
        None => super::print_json(&snapshot),
    }
}
