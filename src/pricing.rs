//! Wholesale pricing engine: break-even, target price for a requested net
//! margin, charm-price suggestion, and realized profit for a candidate offer.
//!
//! Everything here is a pure function over the inputs; catalog and rate
//! table are passed in explicitly so what-if runs are deterministic.

use crate::models::ShippingRate;

/// Carrier volumetric factor used to turn kilograms into desi. Carriers we
/// ship with quote 2 desi per kg for roasted beans; override per channel via
/// `Settings.desi_factor`.
pub const DEFAULT_DESI_FACTOR: f64 = 2.0;

/// Cost profile for one quoted line. Rates are percentages (25.0 = 25%).
#[derive(Debug, Clone)]
pub struct CostProfile {
    /// Shipped weight in kilograms.
    pub weight: f64,
    /// Wholesale cost per kilogram.
    pub unit_wholesale_cost: f64,
    /// Fixed packaging cost per shipment.
    pub packaging_cost: f64,
    /// Marketplace commission, percent of gross. Zero for direct B2B deals.
    pub commission_rate: f64,
    /// Fixed per-order fee charged alongside the commission.
    pub fixed_fee: f64,
    /// Desired net margin, percent of gross price.
    pub target_margin: f64,
}

#[derive(Debug, Clone)]
pub struct PriceAnalysis {
    pub desi: f64,
    pub shipping_cost: f64,
    /// False when no rate band covered the desi; shipping counted as zero,
    /// which understates cost. Callers should surface this.
    pub shipping_resolved: bool,
    pub base_cost: f64,
    pub break_even: f64,
    pub target_price: f64,
    pub convincing_price: f64,
    pub net_profit: f64,
    pub current_margin: f64,
}

/// Volumetric weight: ceil(weight * factor), floored at one desi.
pub fn estimate_desi(weight: f64, factor: f64) -> f64 {
    (weight * factor).ceil().max(1.0)
}

/// Resolve the shipping cost for a desi value. Bands are inclusive on both
/// ends; at most one row should match. A miss yields `(0.0, false)`.
pub fn shipping_cost(rates: &[ShippingRate], desi: f64) -> (f64, bool) {
    match rates
        .iter()
        .find(|r| desi >= r.min_weight && desi <= r.max_weight)
    {
        Some(rate) => (rate.price, true),
        None => (0.0, false),
    }
}

/// Round a target price to a psychologically convincing shelf price: take
/// the hundred below, offer `+99`; if the target already exceeds that,
/// offer `+190` instead. Deliberate heuristic, reproduced exactly.
pub fn convincing_price(target_price: f64) -> f64 {
    let base = (target_price / 100.0).floor() * 100.0;
    let charm = base + 99.0;
    if target_price > charm {
        base + 190.0
    } else {
        charm
    }
}

pub fn analyze(
    profile: &CostProfile,
    rates: &[ShippingRate],
    offer_price: f64,
    desi_factor: f64,
) -> PriceAnalysis {
    let desi = estimate_desi(profile.weight, desi_factor);
    let (shipping, shipping_resolved) = shipping_cost(rates, desi);

    let base_cost =
        profile.unit_wholesale_cost * profile.weight + profile.packaging_cost + shipping;

    let commission = profile.commission_rate / 100.0;
    let margin = profile.target_margin / 100.0;
    let cost_with_fee = base_cost + profile.fixed_fee;

    // Zero-profit price once the channel has taken its cut.
    let break_even = if commission < 1.0 {
        cost_with_fee / (1.0 - commission)
    } else {
        2.0 * base_cost
    };

    // Reverse-engineer the price that leaves `margin` of gross after the
    // commission. When margin + commission reach 100% the formula has no
    // valid solution; saturate at twice the base cost instead of going
    // negative or infinite.
    let divisor = 1.0 - commission - margin;
    let target_price = if divisor > 0.0 {
        cost_with_fee / divisor
    } else {
        2.0 * base_cost
    };

    let commission_amount = offer_price * commission + profile.fixed_fee;
    let total_cost = base_cost + commission_amount;
    let net_profit = offer_price - total_cost;
    let current_margin = if offer_price > 0.0 {
        net_profit / offer_price * 100.0
    } else {
        0.0
    };

    PriceAnalysis {
        desi,
        shipping_cost: shipping,
        shipping_resolved,
        base_cost,
        break_even,
        target_price,
        convincing_price: convincing_price(target_price),
        net_profit,
        current_margin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered_rates() -> Vec<ShippingRate> {
        vec![
            ShippingRate { min_weight: 1.0, max_weight: 5.0, price: 20.0 },
            ShippingRate { min_weight: 6.0, max_weight: 30.0, price: 50.0 },
        ]
    }

    fn b2b_profile() -> CostProfile {
        CostProfile {
            weight: 10.0,
            unit_wholesale_cost: 450.0,
            packaging_cost: 15.0,
            commission_rate: 0.0,
            fixed_fee: 0.0,
            target_margin: 25.0,
        }
    }

    #[test]
    fn test_estimate_desi() {
        assert_eq!(estimate_desi(10.0, 2.0), 20.0);
        assert_eq!(estimate_desi(0.25, 2.0), 1.0);
        assert_eq!(estimate_desi(0.0, 2.0), 1.0);
        assert_eq!(estimate_desi(1.2, 1.5), 2.0);
    }

    #[test]
    fn test_shipping_cost_band_match() {
        let rates = tiered_rates();
        assert_eq!(shipping_cost(&rates, 3.0), (20.0, true));
        assert_eq!(shipping_cost(&rates, 20.0), (50.0, true));
        // Gap between bands resolves to zero with the miss flagged.
        assert_eq!(shipping_cost(&rates, 5.5), (0.0, false));
        assert_eq!(shipping_cost(&rates, 31.0), (0.0, false));
    }

    #[test]
    fn test_analyze_reference_numbers() {
        let analysis = analyze(&b2b_profile(), &tiered_rates(), 0.0, 2.0);
        assert_eq!(analysis.desi, 20.0);
        assert_eq!(analysis.shipping_cost, 50.0);
        assert_eq!(analysis.base_cost, 4565.0);
        assert_eq!(analysis.break_even, 4565.0);
        assert!((analysis.target_price - 6086.6666).abs() < 0.001);
    }

    #[test]
    fn test_convincing_price_charm_branch() {
        // 6086.67 -> base 6000, charm 6099; target below charm keeps it.
        assert_eq!(convincing_price(6086.67), 6099.0);
    }

    #[test]
    fn test_convincing_price_bump_branch() {
        // Target above base+99 bumps to base+190.
        assert_eq!(convincing_price(6120.0), 6190.0);
        assert_eq!(convincing_price(99.5), 190.0);
    }

    #[test]
    fn test_commission_break_even() {
        let mut profile = b2b_profile();
        profile.weight = 0.5;
        profile.unit_wholesale_cost = 450.0;
        profile.packaging_cost = 15.0;
        profile.commission_rate = 4.99;
        profile.fixed_fee = 0.49;
        let rates = tiered_rates();
        let analysis = analyze(&profile, &rates, 0.0, 2.0);
        // base = 225 + 15 + 20 = 260; break-even = 260.49 / 0.9501
        assert!((analysis.base_cost - 260.0).abs() < 1e-9);
        assert!((analysis.break_even - 260.49 / 0.9501).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_margin_saturates() {
        let mut profile = b2b_profile();
        profile.commission_rate = 80.0;
        profile.target_margin = 30.0;
        let analysis = analyze(&profile, &tiered_rates(), 0.0, 2.0);
        assert_eq!(analysis.target_price, 2.0 * analysis.base_cost);
        assert!(analysis.target_price.is_finite());
        assert!(analysis.target_price > 0.0);
    }

    #[test]
    fn test_margin_at_zero_offer_is_zero() {
        let analysis = analyze(&b2b_profile(), &tiered_rates(), 0.0, 2.0);
        assert_eq!(analysis.current_margin, 0.0);
        assert!(!analysis.current_margin.is_nan());
    }

    #[test]
    fn test_realized_profit_at_offer() {
        let mut profile = b2b_profile();
        profile.commission_rate = 10.0;
        profile.fixed_fee = 1.0;
        let analysis = analyze(&profile, &tiered_rates(), 6000.0, 2.0);
        // commission = 600 + 1; total cost = 4565 + 601 = 5166
        assert!((analysis.net_profit - 834.0).abs() < 1e-9);
        assert!((analysis.current_margin - 834.0 / 6000.0 * 100.0).abs() < 1e-9);
    }
}
