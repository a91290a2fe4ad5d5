use tracing::Level;
use vitrina::ProductRecord;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() { tracing_subscriber::fmt().with_max_level(Level::INFO).with_test_writer().init(); }

#[allow(unused)]
pub fn watch(nombre: &str, marca: &str, precio: f64) -> ProductRecord {
    ProductRecord {
        nombre: nombre.to_string(),
        categoria: "relojes".to_string(),
        precio: Some(precio),
        stock: 5,
        marca: Some(marca.to_string()),
        ..Default::default()
    }
}

#[allow(unused)]
pub fn sunglasses(nombre: &str, marca: &str, precio: f64) -> ProductRecord {
    ProductRecord {
        nombre: nombre.to_string(),
        categoria: "gafas".to_string(),
        precio: Some(precio),
        stock: 3,
        marca: Some(marca.to_string()),
        tipo: vec!["sol".to_string()],
        ..Default::default()
    }
}

#[allow(unused)]
pub fn catalog() -> Vec<ProductRecord> {
    vec![
        sunglasses("Aviador clásico", "Ray-Ban", 150.0),
        sunglasses("Redondas doradas", "Persol", 220.0),
        ProductRecord { precio_anterior: Some(180.0), ..sunglasses("Deportivas", "Oakley", 120.0) },
        ProductRecord { tipo: vec!["graduadas".to_string()], ..sunglasses("Montura fina", "TOUS", 95.0) },
        ProductRecord {
            protecciones: vec!["polarizadas".to_string(), "uv400".to_string()],
            ..sunglasses("Polarizadas", "RAY-BAN", 180.0)
        },
    ]
}
