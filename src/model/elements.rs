// src/model/elements.rs

//! Static element property table.
//!
//! Radii are covalent radii in Angstroms, colors are standard CPK (Jmol) in
//! linear 0..1 RGB. The table is read-only; the symbol index is built once on
//! first lookup.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

pub type Rgb = (f64, f64, f64);

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ElementProperties {
    pub symbol: &'static str,
    pub display_name: &'static str,
    /// 0 for the fallback entry
    pub atomic_number: u8,
    pub covalent_radius: f64,
    pub color: Rgb,
}

/// Entry used whenever a species symbol is not in the table.
pub const FALLBACK_ELEMENT: ElementProperties = ElementProperties {
    symbol: "X",
    display_name: "Unknown",
    atomic_number: 0,
    covalent_radius: 1.00,
    color: (1.00, 0.08, 0.58), // Hot Pink for errors
};

const fn el(
    atomic_number: u8,
    symbol: &'static str,
    display_name: &'static str,
    covalent_radius: f64,
    color: Rgb,
) -> ElementProperties {
    ElementProperties {
        symbol,
        display_name,
        atomic_number,
        covalent_radius,
        color,
    }
}

static ELEMENTS: &[ElementProperties] = &[
    // --- Period 1 ---
    el(1, "H", "Hydrogen", 0.37, (1.00, 1.00, 1.00)),
    el(2, "He", "Helium", 0.32, (0.85, 1.00, 1.00)),
    // --- Period 2 ---
    el(3, "Li", "Lithium", 1.34, (0.80, 0.50, 1.00)),
    el(4, "Be", "Beryllium", 0.90, (0.76, 1.00, 0.00)),
    el(5, "B", "Boron", 0.82, (1.00, 0.70, 0.70)),
    el(6, "C", "Carbon", 0.77, (0.20, 0.20, 0.20)),
    el(7, "N", "Nitrogen", 0.75, (0.19, 0.31, 0.97)),
    el(8, "O", "Oxygen", 0.73, (1.00, 0.05, 0.05)),
    el(9, "F", "Fluorine", 0.71, (0.56, 0.88, 0.31)),
    el(10, "Ne", "Neon", 0.69, (0.70, 0.89, 0.96)),
    // --- Period 3 ---
    el(11, "Na", "Sodium", 1.54, (0.67, 0.36, 0.95)),
    el(12, "Mg", "Magnesium", 1.30, (0.54, 1.00, 0.00)),
    el(13, "Al", "Aluminium", 1.18, (0.75, 0.65, 0.65)),
    el(14, "Si", "Silicon", 1.11, (0.94, 0.78, 0.63)),
    el(15, "P", "Phosphorus", 1.06, (1.00, 0.50, 0.00)),
    el(16, "S", "Sulfur", 1.02, (1.00, 1.00, 0.19)),
    el(17, "Cl", "Chlorine", 0.99, (0.12, 0.94, 0.12)),
    el(18, "Ar", "Argon", 0.97, (0.50, 0.82, 0.89)),
    // --- Period 4 ---
    el(19, "K", "Potassium", 1.96, (0.56, 0.25, 0.83)),
    el(20, "Ca", "Calcium", 1.74, (0.24, 1.00, 0.00)),
    el(21, "Sc", "Scandium", 1.44, (0.90, 0.90, 0.90)),
    el(22, "Ti", "Titanium", 1.36, (0.75, 0.76, 0.78)),
    el(23, "V", "Vanadium", 1.25, (0.65, 0.65, 0.67)),
    el(24, "Cr", "Chromium", 1.27, (0.54, 0.60, 0.78)),
    el(25, "Mn", "Manganese", 1.39, (0.61, 0.48, 0.78)),
    el(26, "Fe", "Iron", 1.25, (0.88, 0.40, 0.20)),
    el(27, "Co", "Cobalt", 1.26, (0.94, 0.56, 0.63)),
    el(28, "Ni", "Nickel", 1.21, (0.31, 0.82, 0.31)),
    el(29, "Cu", "Copper", 1.38, (0.78, 0.50, 0.20)),
    el(30, "Zn", "Zinc", 1.31, (0.49, 0.50, 0.69)),
    el(31, "Ga", "Gallium", 1.26, (0.76, 0.56, 0.56)),
    el(32, "Ge", "Germanium", 1.22, (0.40, 0.56, 0.56)),
    el(33, "As", "Arsenic", 1.19, (0.74, 0.50, 0.89)),
    el(34, "Se", "Selenium", 1.16, (1.00, 0.63, 0.00)),
    el(35, "Br", "Bromine", 1.14, (0.65, 0.16, 0.16)),
    el(36, "Kr", "Krypton", 1.10, (0.36, 0.72, 0.82)),
    // --- Period 5 ---
    el(37, "Rb", "Rubidium", 2.11, (0.44, 0.18, 0.69)),
    el(38, "Sr", "Strontium", 1.92, (0.00, 1.00, 0.00)),
    el(39, "Y", "Yttrium", 1.62, (0.58, 1.00, 1.00)),
    el(40, "Zr", "Zirconium", 1.48, (0.58, 0.88, 0.88)),
    el(41, "Nb", "Niobium", 1.37, (0.45, 0.76, 0.79)),
    el(42, "Mo", "Molybdenum", 1.45, (0.33, 0.71, 0.71)),
    el(43, "Tc", "Technetium", 1.56, (0.23, 0.62, 0.62)),
    el(44, "Ru", "Ruthenium", 1.26, (0.14, 0.56, 0.56)),
    el(45, "Rh", "Rhodium", 1.35, (0.04, 0.49, 0.55)),
    el(46, "Pd", "Palladium", 1.31, (0.00, 0.41, 0.52)),
    el(47, "Ag", "Silver", 1.53, (0.75, 0.75, 0.75)),
    el(48, "Cd", "Cadmium", 1.48, (1.00, 0.85, 0.56)),
    el(49, "In", "Indium", 1.44, (0.65, 0.46, 0.45)),
    el(50, "Sn", "Tin", 1.41, (0.40, 0.50, 0.50)),
    el(51, "Sb", "Antimony", 1.38, (0.62, 0.39, 0.71)),
    el(52, "Te", "Tellurium", 1.35, (0.83, 0.48, 0.00)),
    el(53, "I", "Iodine", 1.33, (0.58, 0.00, 0.58)),
    el(54, "Xe", "Xenon", 1.30, (0.26, 0.62, 0.69)),
    // --- Period 6 ---
    el(55, "Cs", "Caesium", 2.25, (0.34, 0.09, 0.56)),
    el(56, "Ba", "Barium", 1.98, (0.00, 0.79, 0.00)),
    el(57, "La", "Lanthanum", 1.69, (0.44, 0.83, 1.00)),
    el(58, "Ce", "Cerium", 1.65, (1.00, 1.00, 0.78)),
    el(59, "Pr", "Praseodymium", 1.65, (0.85, 1.00, 0.78)),
    el(60, "Nd", "Neodymium", 1.64, (0.78, 1.00, 0.78)),
    el(62, "Sm", "Samarium", 1.62, (0.56, 1.00, 0.78)),
    el(63, "Eu", "Europium", 1.85, (0.38, 1.00, 0.78)),
    el(64, "Gd", "Gadolinium", 1.61, (0.27, 1.00, 0.78)),
    el(65, "Tb", "Terbium", 1.59, (0.19, 1.00, 0.78)),
    el(66, "Dy", "Dysprosium", 1.59, (0.12, 1.00, 0.78)),
    el(67, "Ho", "Holmium", 1.58, (0.00, 1.00, 0.61)),
    el(68, "Er", "Erbium", 1.57, (0.00, 0.90, 0.46)),
    el(69, "Tm", "Thulium", 1.56, (0.00, 0.83, 0.32)),
    el(70, "Yb", "Ytterbium", 1.74, (0.00, 0.75, 0.22)),
    el(71, "Lu", "Lutetium", 1.56, (0.00, 0.67, 0.14)),
    el(72, "Hf", "Hafnium", 1.44, (0.30, 0.76, 1.00)),
    el(73, "Ta", "Tantalum", 1.34, (0.30, 0.65, 1.00)),
    el(74, "W", "Tungsten", 1.30, (0.13, 0.58, 0.84)),
    el(75, "Re", "Rhenium", 1.28, (0.15, 0.49, 0.67)),
    el(76, "Os", "Osmium", 1.26, (0.15, 0.40, 0.59)),
    el(77, "Ir", "Iridium", 1.27, (0.09, 0.33, 0.53)),
    el(78, "Pt", "Platinum", 1.30, (0.82, 0.82, 0.88)),
    el(79, "Au", "Gold", 1.44, (1.00, 0.82, 0.14)),
    el(80, "Hg", "Mercury", 1.49, (0.72, 0.72, 0.82)),
    el(81, "Tl", "Thallium", 1.48, (0.65, 0.33, 0.30)),
    el(82, "Pb", "Lead", 1.47, (0.34, 0.35, 0.38)),
    el(83, "Bi", "Bismuth", 1.46, (0.62, 0.31, 0.71)),
    // --- Actinides (Selected) ---
    el(90, "Th", "Thorium", 1.65, (0.00, 0.73, 1.00)),
    el(92, "U", "Uranium", 1.42, (0.00, 0.56, 1.00)),
    el(94, "Pu", "Plutonium", 1.50, (0.00, 0.42, 1.00)),
];

fn index() -> &'static HashMap<&'static str, usize> {
    static INDEX: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();
    INDEX.get_or_init(|| {
        ELEMENTS
            .iter()
            .enumerate()
            .map(|(i, e)| (e.symbol, i))
            .collect()
    })
}

/// Reduces a species string to a canonical element symbol.
///
/// Only the leading alphabetic run is kept, so oxidation-state and label
/// suffixes drop out: `"Fe2+"` -> `"Fe"`, `"si1"` -> `"Si"`. Returns `None`
/// when no letters lead the string.
pub fn normalize_symbol(species: &str) -> Option<String> {
    let letters: String = species
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    let mut chars = letters.chars();
    let first = chars.next()?;
    let mut symbol = first.to_ascii_uppercase().to_string();
    symbol.extend(chars.map(|c| c.to_ascii_lowercase()));
    Some(symbol)
}

/// Exact lookup by canonical symbol.
pub fn lookup(symbol: &str) -> Option<&'static ElementProperties> {
    index().get(symbol).map(|&i| &ELEMENTS[i])
}

/// Lookup after normalizing a raw species string.
pub fn lookup_species(species: &str) -> Option<&'static ElementProperties> {
    normalize_symbol(species).and_then(|s| lookup(&s))
}

/// Like [`lookup_species`] but never fails; unknown species resolve to
/// [`FALLBACK_ELEMENT`].
pub fn resolve(species: &str) -> &'static ElementProperties {
    lookup_species(species).unwrap_or(&FALLBACK_ELEMENT)
}
