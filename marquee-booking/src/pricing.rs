use marquee_catalog::SeatClass;

/// Price multiplier for VIP-class seats. A single policy constant for every
/// hall; per-hall tiers would need this to move into hall data.
pub const VIP_MULTIPLIER: f64 = 1.5;

/// Price of one seat at the session's base price.
pub fn seat_price(class: SeatClass, base_price: f64) -> f64 {
    match class {
        SeatClass::Vip => base_price * VIP_MULTIPLIER,
        SeatClass::Standard | SeatClass::Wheelchair | SeatClass::LoveSeat => base_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vip_seats_cost_half_more() {
        assert_eq!(seat_price(SeatClass::Vip, 300.0), 450.0);
        assert_eq!(seat_price(SeatClass::Standard, 300.0), 300.0);
    }

    #[test]
    fn non_vip_classes_use_base_price() {
        assert_eq!(seat_price(SeatClass::Wheelchair, 250.0), 250.0);
        assert_eq!(seat_price(SeatClass::LoveSeat, 250.0), 250.0);
    }
}
