use lipi_core::Transliterator;

pub fn schemes_cmd() {
    let engine = Transliterator::with_bundled_schemes();
    for name in engine.scheme_names() {
        let kind = if engine.store().get(name).map(|s| s.is_roman).unwrap_or(false) {
            "roman"
        } else {
            "brahmic"
        };
        println!("{:<12} {}", name, kind);
    }
}
