//! Reference data tables.
//!
//! Default emission factors and category constants used when an operator does
//! not supply a site-specific value. The tables are pure read-only data: the
//! built-in set is created once per process (see [`ReferenceData::builtin`]),
//! and alternative sets can be loaded from TOML and passed explicitly to the
//! estimator.
//!
//! # Sources
//!
//! - Grid factors: IEA country grid intensities (kg CO2e/kWh).
//! - Soil organic carbon: three depth layers per soil class (t C/ha).
//! - Vegetation: above-ground biomass, root-to-shoot ratio and annual growth
//!   fraction per vegetation class.
//! - Pond CH4/N2O: literature ranges by farming intensity (g gas/m²/day); the
//!   midpoint of each range is used as the category default.

use crate::errors::{FootprintError, FootprintResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

static BUILTIN: LazyLock<ReferenceData> = LazyLock::new(ReferenceData::default);

/// Soil classes with default soil-organic-carbon stocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Desert,
    Tropical,
    Temperate,
    Boreal,
    Peatland,
    Mangrove,
}

/// Vegetation classes with default biomass and growth parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VegetationType {
    #[serde(rename = "Mangroves", alias = "mangroves")]
    Mangroves,
    #[serde(rename = "Tropical Forests", alias = "tropical_forests")]
    TropicalForests,
    #[serde(rename = "Grasslands", alias = "grasslands")]
    Grasslands,
    #[serde(rename = "Wetlands", alias = "wetlands")]
    Wetlands,
    #[serde(rename = "Temperate Forests", alias = "temperate_forests")]
    TemperateForests,
    #[serde(rename = "Peatlands", alias = "peatlands")]
    Peatlands,
}

/// Farming-intensity class of a pond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityClass {
    Extensive,
    #[serde(alias = "semi-intensive")]
    SemiIntensive,
    Intensive,
}

impl fmt::Display for IntensityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntensityClass::Extensive => write!(f, "extensive"),
            IntensityClass::SemiIntensive => write!(f, "semi-intensive"),
            IntensityClass::Intensive => write!(f, "intensive"),
        }
    }
}

/// Liquid fuels that can drive pumps and aerators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fuel {
    Diesel,
    Petrol,
}

impl fmt::Display for Fuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fuel::Diesel => write!(f, "diesel"),
            Fuel::Petrol => write!(f, "petrol"),
        }
    }
}

/// Soil-organic-carbon stocks for three depth layers, top first.
/// unit: t C/ha
pub type SocLayers = [f64; 3];

/// Default SOC stocks per soil class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilCarbonTable {
    pub desert: SocLayers,
    pub tropical: SocLayers,
    pub temperate: SocLayers,
    pub boreal: SocLayers,
    pub peatland: SocLayers,
    pub mangrove: SocLayers,
}

impl SoilCarbonTable {
    pub fn layers(&self, soil: SoilType) -> &SocLayers {
        match soil {
            SoilType::Desert => &self.desert,
            SoilType::Tropical => &self.tropical,
            SoilType::Temperate => &self.temperate,
            SoilType::Boreal => &self.boreal,
            SoilType::Peatland => &self.peatland,
            SoilType::Mangrove => &self.mangrove,
        }
    }

    /// Total stock over all three layers (t C/ha).
    pub fn total(&self, soil: SoilType) -> f64 {
        self.layers(soil).iter().sum()
    }

    fn all(&self) -> [(&'static str, &SocLayers); 6] {
        [
            ("desert", &self.desert),
            ("tropical", &self.tropical),
            ("temperate", &self.temperate),
            ("boreal", &self.boreal),
            ("peatland", &self.peatland),
            ("mangrove", &self.mangrove),
        ]
    }
}

impl Default for SoilCarbonTable {
    fn default() -> Self {
        Self {
            desert: [10.0, 8.0, 6.0],
            tropical: [70.0, 55.0, 40.0],
            temperate: [85.0, 70.0, 50.0],
            boreal: [200.0, 150.0, 100.0],
            peatland: [500.0, 400.0, 300.0],
            mangrove: [300.0, 250.0, 200.0],
        }
    }
}

/// Biomass defaults for one vegetation class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VegetationProfile {
    /// Above-ground biomass carbon
    /// unit: t C/ha
    pub above_ground_tc_per_ha: f64,
    /// Below-ground to above-ground biomass ratio
    /// unit: dimensionless
    pub root_to_shoot: f64,
    /// Fraction of the standing stock added each year
    /// unit: 1/yr
    pub growth_rate: f64,
}

impl VegetationProfile {
    const fn new(above_ground_tc_per_ha: f64, root_to_shoot: f64, growth_rate: f64) -> Self {
        Self {
            above_ground_tc_per_ha,
            root_to_shoot,
            growth_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VegetationTable {
    pub mangroves: VegetationProfile,
    pub tropical_forests: VegetationProfile,
    pub grasslands: VegetationProfile,
    pub wetlands: VegetationProfile,
    pub temperate_forests: VegetationProfile,
    pub peatlands: VegetationProfile,
}

impl VegetationTable {
    pub fn profile(&self, vegetation: VegetationType) -> &VegetationProfile {
        match vegetation {
            VegetationType::Mangroves => &self.mangroves,
            VegetationType::TropicalForests => &self.tropical_forests,
            VegetationType::Grasslands => &self.grasslands,
            VegetationType::Wetlands => &self.wetlands,
            VegetationType::TemperateForests => &self.temperate_forests,
            VegetationType::Peatlands => &self.peatlands,
        }
    }

    fn all(&self) -> [(&'static str, &VegetationProfile); 6] {
        [
            ("mangroves", &self.mangroves),
            ("tropical_forests", &self.tropical_forests),
            ("grasslands", &self.grasslands),
            ("wetlands", &self.wetlands),
            ("temperate_forests", &self.temperate_forests),
            ("peatlands", &self.peatlands),
        ]
    }
}

impl Default for VegetationTable {
    fn default() -> Self {
        Self {
            mangroves: VegetationProfile::new(150.0, 0.45, 0.015),
            tropical_forests: VegetationProfile::new(120.0, 0.24, 0.015),
            grasslands: VegetationProfile::new(40.0, 0.20, 0.03),
            wetlands: VegetationProfile::new(60.0, 0.50, 0.02),
            temperate_forests: VegetationProfile::new(100.0, 0.25, 0.02),
            peatlands: VegetationProfile::new(70.0, 0.30, 0.01),
        }
    }
}

/// A literature range for a daily area-normalised emission factor.
/// unit: g gas/m²/day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorRange {
    pub low: f64,
    pub high: f64,
}

impl FactorRange {
    const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// CH4 and N2O ranges for one farming-intensity class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PondFactorRanges {
    pub ch4: FactorRange,
    pub n2o: FactorRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PondFactorTable {
    pub extensive: PondFactorRanges,
    pub semi_intensive: PondFactorRanges,
    pub intensive: PondFactorRanges,
}

impl PondFactorTable {
    pub fn ranges(&self, class: IntensityClass) -> &PondFactorRanges {
        match class {
            IntensityClass::Extensive => &self.extensive,
            IntensityClass::SemiIntensive => &self.semi_intensive,
            IntensityClass::Intensive => &self.intensive,
        }
    }
}

impl Default for PondFactorTable {
    fn default() -> Self {
        Self {
            extensive: PondFactorRanges {
                ch4: FactorRange::new(0.005, 0.015),
                n2o: FactorRange::new(0.001, 0.005),
            },
            semi_intensive: PondFactorRanges {
                ch4: FactorRange::new(0.020, 0.050),
                n2o: FactorRange::new(0.005, 0.015),
            },
            intensive: PondFactorRanges {
                ch4: FactorRange::new(0.060, 0.120),
                n2o: FactorRange::new(0.020, 0.045),
            },
        }
    }
}

/// Combustion properties of a liquid fuel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelProperties {
    /// Emission factor
    /// unit: kg CO2e/L
    pub kgco2e_per_liter: f64,
    /// Lower heating value
    /// unit: MJ/L
    pub lhv_mj_per_liter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelTable {
    pub diesel: FuelProperties,
    pub petrol: FuelProperties,
}

impl FuelTable {
    pub fn properties(&self, fuel: Fuel) -> &FuelProperties {
        match fuel {
            Fuel::Diesel => &self.diesel,
            Fuel::Petrol => &self.petrol,
        }
    }
}

impl Default for FuelTable {
    fn default() -> Self {
        // The older constants sheet quotes 35.8 MJ/L for diesel; the pumping and
        // aeration models both use 36.0, which is kept as the single value here.
        Self {
            diesel: FuelProperties {
                kgco2e_per_liter: 2.64,
                lhv_mj_per_liter: 36.0,
            },
            petrol: FuelProperties {
                kgco2e_per_liter: 2.31,
                lhv_mj_per_liter: 34.2,
            },
        }
    }
}

/// Complete set of default factors used by the emission models.
///
/// Loading from TOML starts from the built-in values: any table or field left
/// out of the file keeps its default. The grid map is the exception: when the
/// file provides `[grid_kgco2e_per_kwh]` it replaces the built-in map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    /// Country grid intensity
    /// unit: kg CO2e/kWh
    pub grid_kgco2e_per_kwh: BTreeMap<String, f64>,
    pub fuels: FuelTable,
    /// Default feed intensity (Boundary A)
    /// unit: kg CO2e/kg feed
    pub feed_kgco2e_per_kg: f64,
    /// Default seed intensity (Boundary A)
    /// unit: kg CO2e/1000 PL
    pub seed_kgco2e_per_thousand_pl: f64,
    pub soil_carbon: SoilCarbonTable,
    pub vegetation: VegetationTable,
    pub pond_factors: PondFactorTable,
}

impl Default for ReferenceData {
    fn default() -> Self {
        let grid = [
            ("Mexico", 0.415),
            ("Vietnam", 0.525),
            ("Ecuador", 0.206),
            ("Brazil", 0.074),
            ("India", 0.618),
            ("Thailand", 0.401),
            ("Indonesia", 0.654),
            ("Bangladesh", 0.621),
            ("Guatemala", 0.209),
            ("El Salvador", 0.196),
            ("Honduras", 0.279),
            ("Philippines", 0.546),
            ("China", 0.636),
        ];
        Self {
            grid_kgco2e_per_kwh: grid.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            fuels: FuelTable::default(),
            feed_kgco2e_per_kg: 8.7,
            seed_kgco2e_per_thousand_pl: 0.23,
            soil_carbon: SoilCarbonTable::default(),
            vegetation: VegetationTable::default(),
            pond_factors: PondFactorTable::default(),
        }
    }
}

impl ReferenceData {
    /// The built-in tables, shared by the whole process.
    pub fn builtin() -> &'static ReferenceData {
        &BUILTIN
    }

    /// Parse and validate reference data from a TOML document.
    pub fn from_toml_str(source: &str) -> FootprintResult<Self> {
        let data: ReferenceData = toml::from_str(source)?;
        data.validate()?;
        debug!(
            grid_countries = data.grid_kgco2e_per_kwh.len(),
            "Loaded reference data"
        );
        Ok(data)
    }

    /// Grid intensity for a country.
    pub fn grid_factor(&self, country: &str) -> FootprintResult<f64> {
        self.grid_kgco2e_per_kwh
            .get(country)
            .copied()
            .ok_or_else(|| FootprintError::UnknownCategory {
                kind: "grid_country".to_string(),
                key: country.to_string(),
                hint: "Provide grid_ef_kgco2e_per_kwh to override.".to_string(),
            })
    }

    /// Check that every factor is finite and non-negative and every range is ordered.
    pub fn validate(&self) -> FootprintResult<()> {
        let check = |name: String, value: f64| -> FootprintResult<()> {
            if !value.is_finite() || value < 0.0 {
                return Err(FootprintError::InvalidConfiguration(format!(
                    "{name} must be a finite value >= 0 (got {value})"
                )));
            }
            Ok(())
        };

        for (country, factor) in &self.grid_kgco2e_per_kwh {
            check(format!("grid_kgco2e_per_kwh.{country}"), *factor)?;
        }
        for fuel in [Fuel::Diesel, Fuel::Petrol] {
            let props = self.fuels.properties(fuel);
            check(format!("fuels.{fuel}.kgco2e_per_liter"), props.kgco2e_per_liter)?;
            check(format!("fuels.{fuel}.lhv_mj_per_liter"), props.lhv_mj_per_liter)?;
            if props.lhv_mj_per_liter == 0.0 {
                return Err(FootprintError::InvalidConfiguration(format!(
                    "fuels.{fuel}.lhv_mj_per_liter must be > 0"
                )));
            }
        }
        check("feed_kgco2e_per_kg".to_string(), self.feed_kgco2e_per_kg)?;
        check(
            "seed_kgco2e_per_thousand_pl".to_string(),
            self.seed_kgco2e_per_thousand_pl,
        )?;
        for (soil, layers) in self.soil_carbon.all() {
            for value in layers {
                check(format!("soil_carbon.{soil}"), *value)?;
            }
        }
        for (vegetation, profile) in self.vegetation.all() {
            check(
                format!("vegetation.{vegetation}.above_ground_tc_per_ha"),
                profile.above_ground_tc_per_ha,
            )?;
            check(
                format!("vegetation.{vegetation}.root_to_shoot"),
                profile.root_to_shoot,
            )?;
            check(format!("vegetation.{vegetation}.growth_rate"), profile.growth_rate)?;
        }
        for class in [
            IntensityClass::Extensive,
            IntensityClass::SemiIntensive,
            IntensityClass::Intensive,
        ] {
            let ranges = self.pond_factors.ranges(class);
            for (gas, range) in [("ch4", ranges.ch4), ("n2o", ranges.n2o)] {
                check(format!("pond_factors.{class:?}.{gas}.low"), range.low)?;
                check(format!("pond_factors.{class:?}.{gas}.high"), range.high)?;
                if range.low > range.high {
                    return Err(FootprintError::InvalidConfiguration(format!(
                        "pond_factors.{class:?}.{gas}: low ({}) exceeds high ({})",
                        range.low, range.high
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_builtin_is_valid() {
        ReferenceData::builtin().validate().unwrap();
    }

    #[test]
    fn test_soil_totals() {
        let table = SoilCarbonTable::default();
        assert!(is_close!(table.total(SoilType::Mangrove), 750.0));
        assert!(is_close!(table.total(SoilType::Desert), 24.0));
    }

    #[test]
    fn test_pond_midpoints() {
        let table = PondFactorTable::default();
        let semi = table.ranges(IntensityClass::SemiIntensive);
        assert!(is_close!(semi.ch4.midpoint(), 0.035));
        assert!(is_close!(semi.n2o.midpoint(), 0.01));
    }

    #[test]
    fn test_unknown_grid_country() {
        let err = ReferenceData::builtin().grid_factor("Atlantis").unwrap_err();
        assert!(matches!(err, FootprintError::UnknownCategory { .. }));
        assert!(err.to_string().contains("Atlantis"));
        assert!(err.to_string().contains("grid_ef_kgco2e_per_kwh"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let data = ReferenceData::from_toml_str(
            r#"
            feed_kgco2e_per_kg = 2.5

            [fuels.diesel]
            kgco2e_per_liter = 2.7
            lhv_mj_per_liter = 35.8
            "#,
        )
        .unwrap();

        assert!(is_close!(data.feed_kgco2e_per_kg, 2.5));
        assert!(is_close!(data.fuels.diesel.lhv_mj_per_liter, 35.8));
        assert!(is_close!(data.fuels.petrol.lhv_mj_per_liter, 34.2));
        assert!(is_close!(data.grid_factor("Ecuador").unwrap(), 0.206));
        assert_eq!(data.soil_carbon, SoilCarbonTable::default());
    }

    #[test]
    fn test_negative_factor_rejected() {
        let err = ReferenceData::from_toml_str("seed_kgco2e_per_thousand_pl = -1.0").unwrap_err();
        assert!(matches!(err, FootprintError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_vegetation_labels() {
        let veg: VegetationType = serde_json::from_str("\"Tropical Forests\"").unwrap();
        assert_eq!(veg, VegetationType::TropicalForests);
        let veg: VegetationType = serde_json::from_str("\"mangroves\"").unwrap();
        assert_eq!(veg, VegetationType::Mangroves);
    }
}
