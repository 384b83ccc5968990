use approx::assert_relative_eq;
use is_close::is_close;
use shrimp_footprint::{
    estimate, AerationRequest, Boundary, EnergySupply, EstimationRequest, FeedRequest,
    FootprintError, IntensityClass, LulucRequest, PondFluxRequest, PumpingInputs,
    PumpingRequest, ReportingPeriod, SeedRequest, SequestrationRequest, SoilType, SourceKind,
    VegetationType,
};

fn pumping(cycle_days: f64) -> PumpingRequest {
    let inputs = PumpingInputs {
        cycle_days: Some(cycle_days),
        ..PumpingInputs::new(50_000.0, EnergySupply::grid("Ecuador"))
    };
    PumpingRequest::try_from(inputs).unwrap()
}

fn full_request(period: ReportingPeriod) -> EstimationRequest {
    let cycle_days = 90.0;
    let mut request = EstimationRequest::new(10_000.0, period);
    request
        .with_boundary(Boundary::A)
        .with_pumping(pumping(cycle_days))
        .with_aeration(AerationRequest::new(
            50.0,
            1080.0,
            EnergySupply::grid("Ecuador"),
        ))
        .with_feed(FeedRequest::total(15_000.0))
        .with_seed(SeedRequest::new(2000.0))
        .with_luluc(LulucRequest::new(SoilType::Mangrove, 5.0, 2.0, cycle_days))
        .with_sequestration(SequestrationRequest::new(VegetationType::Mangroves, 1.0))
        .with_pond_ch4_n2o(PondFluxRequest::new(50_000.0, IntensityClass::SemiIntensive));
    request
}

#[test]
fn test_end_to_end_cycle() {
    let result = estimate(&full_request(ReportingPeriod::cycle(90.0))).unwrap();

    let keys: Vec<&str> = result
        .breakdown_kgco2e
        .keys()
        .map(|kind| kind.as_str())
        .collect();
    assert_eq!(
        keys,
        vec!["pumping", "aeration", "feed", "seed", "luluc", "sequestration", "pond_ch4_n2o"]
    );

    let fraction = 90.0 / 365.0;
    let get = |kind| result.contribution(kind).unwrap();

    // 50 hp × 0.7457 / 0.8 × 1080 h × 0.206
    assert_relative_eq!(get(SourceKind::Aeration), 10_368.9585, max_relative = 1e-9);
    assert_relative_eq!(get(SourceKind::Feed), 130_500.0, max_relative = 1e-12);
    assert_relative_eq!(get(SourceKind::Seed), 460.0, max_relative = 1e-12);
    // 750 t C/ha × 5 ha × 3.67, 70 % immediate + 30 % over 20 years
    assert_relative_eq!(
        get(SourceKind::Luluc),
        9_840_187.5 * fraction,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        get(SourceKind::Sequestration),
        -11_973.375 * fraction,
        max_relative = 1e-9
    );
    assert_relative_eq!(get(SourceKind::PondCh4N2o), 26_640.0, max_relative = 1e-9);
    assert!(get(SourceKind::Pumping) > 0.0);

    assert!(get(SourceKind::Sequestration) < 0.0);
    assert!(is_close!(
        result.intensity_kgco2e_per_kg_shrimp,
        result.total_kgco2e / 10_000.0
    ));
    assert_eq!(result.boundary, Boundary::A);
    assert_eq!(result.inputs.sources().len(), 7);
}

#[test]
fn test_feed_only() {
    let mut request = EstimationRequest::new(10_000.0, ReportingPeriod::cycle(90.0));
    request.with_feed(FeedRequest::total(15_000.0));

    let result = estimate(&request).unwrap();
    assert_eq!(result.breakdown_kgco2e.len(), 1);
    assert_eq!(
        result.total_kgco2e,
        result.contribution(SourceKind::Feed).unwrap()
    );
    assert!(result.inputs.feed.is_some());
    assert!(result.inputs.pumping.is_none());
}

#[test]
fn test_annual_sources_scale_with_cycle_length() {
    let annual = |cycle_days: f64| {
        let mut request = EstimationRequest::new(1000.0, ReportingPeriod::cycle(cycle_days));
        request
            .with_luluc(LulucRequest::new(SoilType::Tropical, 3.0, 1.0, cycle_days))
            .with_sequestration(SequestrationRequest::new(VegetationType::Grasslands, 4.0));
        estimate(&request).unwrap()
    };

    let short = annual(60.0);
    let long = annual(180.0);
    for kind in [SourceKind::Luluc, SourceKind::Sequestration] {
        assert_relative_eq!(
            long.contribution(kind).unwrap(),
            3.0 * short.contribution(kind).unwrap(),
            max_relative = 1e-12
        );
    }
}

#[test]
fn test_year_period_uses_full_annual_figures() {
    let mut request = EstimationRequest::new(1000.0, ReportingPeriod::Year);
    request
        .with_sequestration(SequestrationRequest::new(VegetationType::Mangroves, 1.0))
        .with_pond_ch4_n2o(PondFluxRequest::new(50_000.0, IntensityClass::SemiIntensive));

    let result = estimate(&request).unwrap();
    assert_relative_eq!(
        result.contribution(SourceKind::Sequestration).unwrap(),
        -11_973.375,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        result.contribution(SourceKind::PondCh4N2o).unwrap(),
        26_640.0 * 365.0 / 90.0,
        max_relative = 1e-9
    );
    assert_eq!(result.period.cycle_days(), None);
}

#[test]
fn test_negative_harvest_fails() {
    let mut request = full_request(ReportingPeriod::cycle(90.0));
    request.harvested_shrimp_kg = -5.0;
    assert_eq!(
        estimate(&request).unwrap_err().field(),
        Some("harvested_shrimp_kg")
    );
}

#[test]
fn test_single_source_failure_aborts_estimation() {
    let mut request = full_request(ReportingPeriod::cycle(90.0));
    request.with_aeration(AerationRequest {
        motor_efficiency: 1.2,
        ..AerationRequest::new(50.0, 1080.0, EnergySupply::grid("Ecuador"))
    });

    let err = estimate(&request).unwrap_err();
    assert_eq!(err.field(), Some("motor_efficiency"));
}

#[test]
fn test_unknown_grid_country_fails() {
    let mut request = EstimationRequest::new(1000.0, ReportingPeriod::Year);
    request.with_aeration(AerationRequest::new(
        10.0,
        100.0,
        EnergySupply::grid("Atlantis"),
    ));

    match estimate(&request).unwrap_err() {
        FootprintError::UnknownCategory { key, hint, .. } => {
            assert_eq!(key, "Atlantis");
            assert!(hint.contains("grid_ef_kgco2e_per_kwh"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_grid_override_scales_aeration() {
    let run = |energy| {
        let mut request = EstimationRequest::new(1000.0, ReportingPeriod::cycle(90.0));
        request.with_aeration(AerationRequest::new(50.0, 1080.0, energy));
        estimate(&request)
            .unwrap()
            .contribution(SourceKind::Aeration)
            .unwrap()
    };

    let ecuador = run(EnergySupply::grid("Ecuador"));
    let overridden = run(EnergySupply::grid_with_factor(0.5));
    assert_relative_eq!(overridden / ecuador, 0.5 / 0.206, max_relative = 1e-12);
}

#[test]
fn test_feed_from_conversion_ratio_uses_harvest() {
    let mut request = EstimationRequest::new(2000.0, ReportingPeriod::cycle(100.0));
    request.with_feed(FeedRequest::from_ratio(1.5));

    let result = estimate(&request).unwrap();
    assert_relative_eq!(result.total_kgco2e, 3000.0 * 8.7, max_relative = 1e-12);
    assert_relative_eq!(
        result.intensity_kgco2e_per_kg_shrimp,
        1.5 * 8.7,
        max_relative = 1e-12
    );
}

#[test]
fn test_luluc_cycle_length_disagreeing_with_period_fails() {
    let mut request = EstimationRequest::new(1000.0, ReportingPeriod::cycle(90.0));
    request.with_luluc(LulucRequest::new(SoilType::Mangrove, 1.0, 2.0, 365.0));

    let err = estimate(&request).unwrap_err();
    assert!(matches!(err, FootprintError::ConflictingFields { .. }));
    assert!(err.to_string().contains("cycle_days"));

    request.with_luluc(LulucRequest::new(SoilType::Mangrove, 1.0, 2.0, 90.0));
    assert!(estimate(&request).is_ok());
}
