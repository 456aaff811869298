//! Integration tests for module exports and parameter validation.
//!
//! Verifies that public types are reachable via absolute paths and that the
//! builder accepts exactly the documented domain.

use proptest::prelude::*;

/// Test that the types module re-exports are accessible.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::PricingError;
    use pricer_core::types::option::{OptionParameters, OptionSide, PricingMode};
    use pricer_core::types::request::PricingRequest;
    use pricer_core::types::result::PricingResult;

    let params = OptionParameters::builder()
        .side(OptionSide::Put)
        .spot(50.0)
        .strike(55.0)
        .time_to_maturity(0.25)
        .volatility(0.4)
        .mode(PricingMode::Discrete)
        .risk_free_rate(0.0)
        .dividend_yield(0.0)
        .build()
        .unwrap();

    let request = PricingRequest::from(&params);
    assert_eq!(request.side, "put");
    assert_eq!(request.mode, "discrete");

    let result = PricingResult::default();
    assert_eq!(result.price, 0.0);

    let err: PricingError = "american".parse::<PricingMode>().unwrap_err();
    assert_eq!(err.kind(), "unsupported_mode");
}

/// Test that the JSON response shape matches the external interface.
#[test]
fn test_result_json_shape() {
    use pricer_core::types::PricingResult;

    let result = PricingResult {
        price: 10.45,
        delta: 0.64,
        gamma: 0.019,
        theta: -6.41,
        vega: 37.52,
        rho: 53.23,
    };
    let json = serde_json::to_value(result).unwrap();
    for key in ["price", "delta", "gamma", "theta", "vega", "rho"] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_builder_accepts_valid_domain(
        spot in 1e-6..1e6_f64,
        strike in 1e-6..1e6_f64,
        maturity in 0.0..30.0_f64,
        vol in 0.0..5.0_f64,
        rate in -0.2..0.5_f64,
        dividend in 0.0..0.2_f64,
    ) {
        use pricer_core::types::{OptionParameters, OptionSide, PricingMode};

        let built = OptionParameters::builder()
            .side(OptionSide::Call)
            .spot(spot)
            .strike(strike)
            .time_to_maturity(maturity)
            .volatility(vol)
            .risk_free_rate(rate)
            .dividend_yield(dividend)
            .mode(PricingMode::Continuous)
            .build();
        prop_assert!(built.is_ok());
    }

    #[test]
    fn test_builder_rejects_non_positive_spot(spot in -1e6..=0.0_f64) {
        use pricer_core::types::{OptionParameters, OptionSide, PricingError, PricingMode};

        let built = OptionParameters::builder()
            .side(OptionSide::Call)
            .spot(spot)
            .strike(100.0)
            .time_to_maturity(1.0)
            .volatility(0.2)
            .risk_free_rate(0.0)
            .dividend_yield(0.0)
            .mode(PricingMode::Continuous)
            .build();
        prop_assert!(matches!(built, Err(PricingError::InvalidParameter(_))));
    }
}
