//! Deterministic quote pricing
//!
//! `calculate` is a pure function from a [`QuoteRequest`] and the catalog to
//! a [`Quote`]. It performs no I/O, has no failure path, and assumes inputs
//! were normalized by the caller (positive dimensions, quantity >= 1).

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ProcessKind};

/// Machine-time rate per cm³ per unit, before the process multiplier
pub const MACHINE_RATE_PER_CM3: f64 = 1.5;

/// Flat setup fee charged on every order
pub const LABOR_SETUP_FEE: f64 = 50.0;

/// Per-unit labor rate for small orders
pub const LABOR_RATE_STANDARD: f64 = 10.0;

/// Per-unit labor rate once the order passes the bulk threshold
pub const LABOR_RATE_BULK: f64 = 5.0;

/// Quantities strictly above this use the bulk labor rate
pub const BULK_QTY_THRESHOLD: u32 = 5;

/// Hours per working day when converting production hours to days
pub const WORKDAY_HOURS: f64 = 8.0;

/// Shipping buffer added to every delivery estimate, in days
pub const SHIPPING_BUFFER_DAYS: u32 = 2;

/// Material price used if a process somehow has no materials at all.
/// Load-time catalog validation makes this unreachable in practice.
const FALLBACK_PRICE_PER_CM3: f64 = 3.0;

/// Bounding-box dimensions of the part, in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width_mm: f64,
    pub depth_mm: f64,
    pub height_mm: f64,
}

impl Dimensions {
    /// Bounding-box volume in mm³
    pub fn volume_mm3(&self) -> f64 {
        self.width_mm * self.depth_mm * self.height_mm
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}x{}mm",
            self.width_mm, self.depth_mm, self.height_mm
        )
    }
}

impl std::str::FromStr for Dimensions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(['x', 'X']).collect();
        if parts.len() != 3 {
            return Err(format!(
                "Invalid dimensions '{}'. Expected WIDTHxDEPTHxHEIGHT in mm, e.g. 50x50x50",
                s
            ));
        }

        let mut values = [0.0f64; 3];
        for (i, part) in parts.iter().enumerate() {
            let value: f64 = part
                .trim()
                .parse()
                .map_err(|_| format!("Invalid dimension '{}' in '{}'", part, s))?;
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("Dimension '{}' must be a positive number", part));
            }
            values[i] = value;
        }

        Ok(Dimensions {
            width_mm: values[0],
            depth_mm: values[1],
            height_mm: values[2],
        })
    }
}

/// Everything needed to price one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Manufacturing process
    pub process: ProcessKind,

    /// Material id; unknown ids degrade to the process default
    pub material: String,

    /// Bounding-box dimensions
    pub dimensions: Dimensions,

    /// Order quantity, at least 1
    pub quantity: u32,
}

/// Cost lines shown alongside a quote
///
/// The machine line carries the process multiplier while material and
/// labor do not, so the three lines only sum to the total for processes
/// with multiplier 1.0. That mismatch is long-standing display behavior
/// and is kept as-is; see DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    /// Material cost, before the process multiplier
    pub material_cost: f64,

    /// Machine-time cost, including the process multiplier
    pub machine_cost: f64,

    /// Setup fee plus per-unit labor, before the process multiplier
    pub labor_cost: f64,
}

/// A priced job
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Price per unit
    pub unit_price: f64,

    /// Total order price
    pub total_price: f64,

    /// Estimated production hours, never below 1
    pub estimated_hours: f64,

    /// Estimated calendar days to delivery
    pub estimated_days: u32,

    /// Cost lines
    pub breakdown: QuoteBreakdown,
}

/// Price a request against the catalog
pub fn calculate(catalog: &Catalog, request: &QuoteRequest) -> Quote {
    let price_per_cm3 = catalog
        .resolve_material(request.process, &request.material)
        .map_or(FALLBACK_PRICE_PER_CM3, |l| l.material.price_per_cm3);

    let quantity = request.quantity as f64;
    let volume_cm3 = request.dimensions.volume_mm3() / 1000.0;

    // Base costs
    let material_cost = volume_cm3 * price_per_cm3 * quantity;
    let machine_cost = volume_cm3 * MACHINE_RATE_PER_CM3 * quantity;
    let labor_rate = if request.quantity > BULK_QTY_THRESHOLD {
        LABOR_RATE_BULK
    } else {
        LABOR_RATE_STANDARD
    };
    let labor_cost = LABOR_SETUP_FEE + quantity * labor_rate;

    let multiplier = request.process.cost_multiplier();
    let total_price = (material_cost + machine_cost + labor_cost) * multiplier;
    let unit_price = total_price / quantity;

    // Time estimate: days derive from the unrounded hours
    let estimated_hours = (volume_cm3 * request.process.hours_per_cm3() * quantity).max(1.0);
    let estimated_days = (estimated_hours / WORKDAY_HOURS).ceil() as u32 + SHIPPING_BUFFER_DAYS;

    Quote {
        unit_price: round_cents(unit_price),
        total_price: round_cents(total_price),
        estimated_hours: round_tenths(estimated_hours),
        estimated_days,
        breakdown: QuoteBreakdown {
            material_cost: round_cents(material_cost),
            machine_cost: round_cents(machine_cost * multiplier),
            labor_cost: round_cents(labor_cost),
        },
    }
}

/// Round to 2 decimal places, half away from zero at the cent level
fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to 1 decimal place
fn round_tenths(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> &'static Catalog {
        Catalog::global().unwrap()
    }

    fn request(process: ProcessKind, material: &str, dims: &str, quantity: u32) -> QuoteRequest {
        QuoteRequest {
            process,
            material: material.to_string(),
            dimensions: dims.parse().unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_reference_quote_fdm_pla_cube() {
        // 50x50x50mm = 125 cm³ of PLA at 2.5/cm³, single unit:
        // material 312.50, machine 187.50, labor 60, multiplier 1.0
        let quote = calculate(catalog(), &request(ProcessKind::Fdm, "pla", "50x50x50", 1));

        assert_eq!(quote.total_price, 560.0);
        assert_eq!(quote.unit_price, 560.0);
        assert_eq!(quote.breakdown.material_cost, 312.5);
        assert_eq!(quote.breakdown.machine_cost, 187.5);
        assert_eq!(quote.breakdown.labor_cost, 60.0);
        assert_eq!(quote.estimated_hours, 62.5);
        assert_eq!(quote.estimated_days, 10);
    }

    #[test]
    fn test_labor_step_function_at_bulk_threshold() {
        // Five units bill 50 + 5*10 = 100; six units bill 50 + 6*5 = 80.
        // A bigger order with cheaper labor is intentional reference
        // behavior, not a bug.
        let five = calculate(catalog(), &request(ProcessKind::Fdm, "pla", "10x10x10", 5));
        let six = calculate(catalog(), &request(ProcessKind::Fdm, "pla", "10x10x10", 6));

        assert_eq!(five.breakdown.labor_cost, 100.0);
        assert_eq!(six.breakdown.labor_cost, 80.0);
        assert!(six.breakdown.labor_cost < five.breakdown.labor_cost);
    }

    #[test]
    fn test_unit_price_times_quantity_matches_total() {
        for (process, material, dims, qty) in [
            (ProcessKind::Fdm, "petg", "50x50x15", 4u32),
            (ProcessKind::Sla, "resin_tough", "25x25x8", 2),
            (ProcessKind::Cnc, "aluminum_6061", "80x40x10", 10),
            (ProcessKind::Laser, "acrylic_6mm", "300x200x6", 7),
        ] {
            let quote = calculate(catalog(), &request(process, material, dims, qty));
            let drift = (quote.unit_price * qty as f64 - quote.total_price).abs();
            assert!(
                drift <= 0.01 * qty as f64,
                "{process}/{material} x{qty}: drift {drift}"
            );
        }
    }

    #[test]
    fn test_totals_are_non_negative_and_hours_floored() {
        // A tiny laser job: 0.1 hours/cm³ would be well under an hour
        let quote = calculate(catalog(), &request(ProcessKind::Laser, "wood_3mm", "10x10x3", 1));
        assert!(quote.total_price >= 0.0);
        assert_eq!(quote.estimated_hours, 1.0);
        // 1 hour => 1 workday, plus the shipping buffer
        assert_eq!(quote.estimated_days, 3);
    }

    #[test]
    fn test_process_multiplier_scales_total() {
        // Identical request, CNC is 2.0x and laser 0.8x of the same base
        let base = calculate(catalog(), &request(ProcessKind::Fdm, "pla", "20x20x20", 1));
        let cnc = calculate(catalog(), &request(ProcessKind::Cnc, "pla", "20x20x20", 1));
        let laser = calculate(catalog(), &request(ProcessKind::Laser, "pla", "20x20x20", 1));

        // "pla" is unknown to cnc and laser, so all three fall back to a
        // different material price; compare via recomputed bases instead
        // of exact cross-process ratios.
        assert!(cnc.total_price > base.total_price);
        assert!(laser.total_price < cnc.total_price);
    }

    #[test]
    fn test_breakdown_machine_line_includes_multiplier() {
        // 10x10x10mm = 1 cm³, qty 1, CNC: raw machine cost is 1.5, the
        // displayed line is 1.5 * 2.0 = 3.0, while the material and labor
        // lines stay unmultiplied.
        let quote = calculate(
            catalog(),
            &request(ProcessKind::Cnc, "aluminum_6061", "10x10x10", 1),
        );

        assert_eq!(quote.breakdown.machine_cost, 3.0);
        assert_eq!(quote.breakdown.material_cost, 15.0);
        assert_eq!(quote.breakdown.labor_cost, 60.0);
        // The lines deliberately do not sum to the total for CNC
        let line_sum = quote.breakdown.material_cost
            + quote.breakdown.machine_cost
            + quote.breakdown.labor_cost;
        assert_ne!(round_cents(line_sum), quote.total_price);
        assert_eq!(quote.total_price, round_cents((15.0 + 1.5 + 60.0) * 2.0));
    }

    #[test]
    fn test_unknown_material_falls_back_to_process_default() {
        let known = calculate(catalog(), &request(ProcessKind::Fdm, "pla", "50x50x50", 1));
        let unknown = calculate(
            catalog(),
            &request(ProcessKind::Fdm, "unobtainium", "50x50x50", 1),
        );

        // PLA is the FDM default, so the unknown id prices identically
        assert_eq!(known.total_price, unknown.total_price);
        assert_eq!(known.breakdown, unknown.breakdown);
    }

    #[test]
    fn test_rounding_is_at_cent_level() {
        // 1.125 and 0.25 are exact in binary, so the half-away-from-zero
        // behavior is observable without representation noise
        assert_eq!(round_cents(1.125), 1.13);
        assert_eq!(round_cents(1.234), 1.23);
        assert_eq!(round_cents(0.0), 0.0);
        assert_eq!(round_tenths(0.25), 0.3);
    }

    #[test]
    fn test_dimensions_parse() {
        let dims: Dimensions = "120x80x40".parse().unwrap();
        assert_eq!(dims.width_mm, 120.0);
        assert_eq!(dims.depth_mm, 80.0);
        assert_eq!(dims.height_mm, 40.0);
        assert_eq!(dims.volume_mm3(), 384_000.0);

        assert!("120x80".parse::<Dimensions>().is_err());
        assert!("120x80xabc".parse::<Dimensions>().is_err());
        assert!("120x-80x40".parse::<Dimensions>().is_err());
        assert!("120x0x40".parse::<Dimensions>().is_err());
    }
}
