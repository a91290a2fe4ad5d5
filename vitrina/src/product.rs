//! Canonical product record shape for the storefront catalog.
//!
//! The engine itself only reads records through [`Facetable`]; this is the
//! structured shape the data collaborator returns, with explicit optional
//! fields per known facet key so facet/attribute alignment is checked at
//! compile time instead of through an open-ended dictionary.

use serde::{Deserialize, Serialize};

use crate::filter::{AttributeValue, Facetable};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductRecord {
    pub nombre: String,
    pub categoria: String,
    pub precio: Option<f64>,
    pub precio_anterior: Option<f64>,
    pub stock: u32,
    pub marca: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub tipo: Vec<String>,
    pub material_correa: Option<String>,
    pub color_correa: Option<String>,
    pub funciones: Vec<String>,
    pub protecciones: Vec<String>,
    pub talla: Option<f64>,
}

impl ProductRecord {
    /// The storefront's price-drop rule: a previous price above the current one.
    pub fn on_sale(&self) -> bool {
        match (self.precio_anterior, self.precio) {
            (Some(before), Some(now)) => before > now,
            _ => false,
        }
    }
}

impl Facetable for ProductRecord {
    fn attribute(&self, key: &str) -> Option<AttributeValue> {
        match key {
            "categoria" => Some(AttributeValue::Text(self.categoria.clone())),
            "precio" => self.precio.map(AttributeValue::Number),
            "stock" => Some(AttributeValue::Number(f64::from(self.stock))),
            "marca" => self.marca.clone().map(AttributeValue::Text),
            "material" => self.material.clone().map(AttributeValue::Text),
            "color" => self.color.clone().map(AttributeValue::Text),
            "tipo" => (!self.tipo.is_empty()).then(|| AttributeValue::List(self.tipo.clone())),
            "materialCorrea" => self.material_correa.clone().map(AttributeValue::Text),
            "colorCorrea" => self.color_correa.clone().map(AttributeValue::Text),
            "funciones" => (!self.funciones.is_empty()).then(|| AttributeValue::List(self.funciones.clone())),
            "protecciones" => (!self.protecciones.is_empty()).then(|| AttributeValue::List(self.protecciones.clone())),
            "talla" => self.talla.map(AttributeValue::Number),
            "enOferta" => Some(AttributeValue::Flag(self.on_sale())),
            _ => None,
        }
    }
}
