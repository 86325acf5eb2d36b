//! The closed set of activity record categories.

use crate::schema::*;
use cf_core::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// GHG Protocol reporting scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Scope1,
    Scope2,
    Scope3,
    /// Scope 3 category 15, kept apart because it is allocated rather than measured.
    Financed,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scope::Scope1 => "scope 1",
            Scope::Scope2 => "scope 2",
            Scope::Scope3 => "scope 3",
            Scope::Financed => "financed",
        };
        f.write_str(name)
    }
}

/// One validated activity row. The tag is the category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ActivityRecord {
    StationaryCombustion(StationaryCombustion),
    MobileCombustion(MobileCombustion),
    FugitiveEmission(FugitiveEmission),

    PurchasedPower(PurchasedPower),

    PurchasedGoods(SupplierGoods),
    CapitalGoods(SupplierGoods),
    EnergyRelated(EnergyRelated),
    UpstreamTransport(Transport),
    WasteGenerated(Waste),
    BusinessTravel(BusinessTravel),
    BusinessStay(BusinessStay),
    EmployeeCommute(EmployeeCommute),
    UpstreamLeasedEstate(Premises),
    UpstreamLeasedAuto(LeasedAuto),
    DownstreamTransport(Transport),
    ProcessingProducts(ProcessingProducts),
    UseOfSold(UseOfSold),
    EndOfLifeTreatment(Waste),
    DownstreamLeasedEstate(Premises),
    DownstreamLeasedAuto(LeasedAuto),
    Franchise(Premises),

    ListedEquity(ListedEquity),
    UnlistedEquity(CorporateFinance),
    CorporateBonds(CorporateFinance),
    BusinessLoans(BusinessLoan),
    CommercialRealEstate(PropertyLoan),
    Mortgage(PropertyLoan),
    VehicleLoans(VehicleLoan),
    ProjectFinance(ProjectFinance),
    EmissionRemovals(EmissionRemoval),
    SovereignDebt(SovereignDebt),
}

/// Fieldless mirror of [`ActivityRecord`]'s variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    StationaryCombustion,
    MobileCombustion,
    FugitiveEmission,
    PurchasedPower,
    PurchasedGoods,
    CapitalGoods,
    EnergyRelated,
    UpstreamTransport,
    WasteGenerated,
    BusinessTravel,
    BusinessStay,
    EmployeeCommute,
    UpstreamLeasedEstate,
    UpstreamLeasedAuto,
    DownstreamTransport,
    ProcessingProducts,
    UseOfSold,
    EndOfLifeTreatment,
    DownstreamLeasedEstate,
    DownstreamLeasedAuto,
    Franchise,
    ListedEquity,
    UnlistedEquity,
    CorporateBonds,
    BusinessLoans,
    CommercialRealEstate,
    Mortgage,
    VehicleLoans,
    ProjectFinance,
    EmissionRemovals,
    SovereignDebt,
}

impl Category {
    pub const ALL: [Category; 31] = [
        Category::StationaryCombustion,
        Category::MobileCombustion,
        Category::FugitiveEmission,
        Category::PurchasedPower,
        Category::PurchasedGoods,
        Category::CapitalGoods,
        Category::EnergyRelated,
        Category::UpstreamTransport,
        Category::WasteGenerated,
        Category::BusinessTravel,
        Category::BusinessStay,
        Category::EmployeeCommute,
        Category::UpstreamLeasedEstate,
        Category::UpstreamLeasedAuto,
        Category::DownstreamTransport,
        Category::ProcessingProducts,
        Category::UseOfSold,
        Category::EndOfLifeTreatment,
        Category::DownstreamLeasedEstate,
        Category::DownstreamLeasedAuto,
        Category::Franchise,
        Category::ListedEquity,
        Category::UnlistedEquity,
        Category::CorporateBonds,
        Category::BusinessLoans,
        Category::CommercialRealEstate,
        Category::Mortgage,
        Category::VehicleLoans,
        Category::ProjectFinance,
        Category::EmissionRemovals,
        Category::SovereignDebt,
    ];

    pub fn scope(self) -> Scope {
        use Category::*;
        match self {
            StationaryCombustion | MobileCombustion | FugitiveEmission => Scope::Scope1,
            PurchasedPower => Scope::Scope2,
            PurchasedGoods | CapitalGoods | EnergyRelated | UpstreamTransport | WasteGenerated
            | BusinessTravel | BusinessStay | EmployeeCommute | UpstreamLeasedEstate
            | UpstreamLeasedAuto | DownstreamTransport | ProcessingProducts | UseOfSold
            | EndOfLifeTreatment | DownstreamLeasedEstate | DownstreamLeasedAuto | Franchise => {
                Scope::Scope3
            }
            ListedEquity | UnlistedEquity | CorporateBonds | BusinessLoans
            | CommercialRealEstate | Mortgage | VehicleLoans | ProjectFinance
            | EmissionRemovals | SovereignDebt => Scope::Financed,
        }
    }

    /// Short reporting code, e.g. `s3c8_1` for upstream leased buildings.
    pub fn code(self) -> &'static str {
        use Category::*;
        match self {
            StationaryCombustion => "s1sc",
            MobileCombustion => "s1mc",
            FugitiveEmission => "s1fe",
            PurchasedPower => "s2ie",
            PurchasedGoods => "s3c1",
            CapitalGoods => "s3c2",
            EnergyRelated => "s3c3",
            UpstreamTransport => "s3c4",
            WasteGenerated => "s3c5",
            BusinessTravel => "s3c6_1",
            BusinessStay => "s3c6_2",
            EmployeeCommute => "s3c7",
            UpstreamLeasedEstate => "s3c8_1",
            UpstreamLeasedAuto => "s3c8_2",
            DownstreamTransport => "s3c9",
            ProcessingProducts => "s3c10",
            UseOfSold => "s3c11",
            EndOfLifeTreatment => "s3c12",
            DownstreamLeasedEstate => "s3c13_1",
            DownstreamLeasedAuto => "s3c13_2",
            Franchise => "s3c14",
            ListedEquity => "s3c15_1a",
            UnlistedEquity => "s3c15_1b",
            CorporateBonds => "s3c15_1c",
            BusinessLoans => "s3c15_1d",
            CommercialRealEstate => "s3c15_1e",
            Mortgage => "s3c15_2a",
            VehicleLoans => "s3c15_2b",
            ProjectFinance => "s3c15_3",
            EmissionRemovals => "s3c15_4",
            SovereignDebt => "s3c15_5",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl ActivityRecord {
    pub fn category(&self) -> Category {
        use ActivityRecord as R;
        match self {
            R::StationaryCombustion(_) => Category::StationaryCombustion,
            R::MobileCombustion(_) => Category::MobileCombustion,
            R::FugitiveEmission(_) => Category::FugitiveEmission,
            R::PurchasedPower(_) => Category::PurchasedPower,
            R::PurchasedGoods(_) => Category::PurchasedGoods,
            R::CapitalGoods(_) => Category::CapitalGoods,
            R::EnergyRelated(_) => Category::EnergyRelated,
            R::UpstreamTransport(_) => Category::UpstreamTransport,
            R::WasteGenerated(_) => Category::WasteGenerated,
            R::BusinessTravel(_) => Category::BusinessTravel,
            R::BusinessStay(_) => Category::BusinessStay,
            R::EmployeeCommute(_) => Category::EmployeeCommute,
            R::UpstreamLeasedEstate(_) => Category::UpstreamLeasedEstate,
            R::UpstreamLeasedAuto(_) => Category::UpstreamLeasedAuto,
            R::DownstreamTransport(_) => Category::DownstreamTransport,
            R::ProcessingProducts(_) => Category::ProcessingProducts,
            R::UseOfSold(_) => Category::UseOfSold,
            R::EndOfLifeTreatment(_) => Category::EndOfLifeTreatment,
            R::DownstreamLeasedEstate(_) => Category::DownstreamLeasedEstate,
            R::DownstreamLeasedAuto(_) => Category::DownstreamLeasedAuto,
            R::Franchise(_) => Category::Franchise,
            R::ListedEquity(_) => Category::ListedEquity,
            R::UnlistedEquity(_) => Category::UnlistedEquity,
            R::CorporateBonds(_) => Category::CorporateBonds,
            R::BusinessLoans(_) => Category::BusinessLoans,
            R::CommercialRealEstate(_) => Category::CommercialRealEstate,
            R::Mortgage(_) => Category::Mortgage,
            R::VehicleLoans(_) => Category::VehicleLoans,
            R::ProjectFinance(_) => Category::ProjectFinance,
            R::EmissionRemovals(_) => Category::EmissionRemovals,
            R::SovereignDebt(_) => Category::SovereignDebt,
        }
    }

    pub fn scope(&self) -> Scope {
        self.category().scope()
    }

    pub fn meta(&self) -> &RecordMeta {
        use ActivityRecord as R;
        match self {
            R::StationaryCombustion(r) => &r.meta,
            R::MobileCombustion(r) => &r.meta,
            R::FugitiveEmission(r) => &r.meta,
            R::PurchasedPower(r) => &r.meta,
            R::PurchasedGoods(r) | R::CapitalGoods(r) => &r.meta,
            R::EnergyRelated(r) => &r.meta,
            R::UpstreamTransport(r) | R::DownstreamTransport(r) => &r.meta,
            R::WasteGenerated(r) | R::EndOfLifeTreatment(r) => &r.meta,
            R::BusinessTravel(r) => &r.meta,
            R::BusinessStay(r) => &r.meta,
            R::EmployeeCommute(r) => &r.meta,
            R::UpstreamLeasedEstate(r) | R::DownstreamLeasedEstate(r) | R::Franchise(r) => {
                &r.meta
            }
            R::UpstreamLeasedAuto(r) | R::DownstreamLeasedAuto(r) => &r.meta,
            R::ProcessingProducts(r) => &r.meta,
            R::UseOfSold(r) => &r.meta,
            R::ListedEquity(r) => &r.meta,
            R::UnlistedEquity(r) | R::CorporateBonds(r) => &r.meta,
            R::BusinessLoans(r) => &r.meta,
            R::CommercialRealEstate(r) | R::Mortgage(r) => &r.meta,
            R::VehicleLoans(r) => &r.meta,
            R::ProjectFinance(r) => &r.meta,
            R::EmissionRemovals(r) => &r.meta,
            R::SovereignDebt(r) => &r.meta,
        }
    }

    pub fn id(&self) -> RecordId {
        self.meta().id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_distinct_code() {
        let mut codes: Vec<_> = Category::ALL.iter().map(|c| c.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), Category::ALL.len());
    }

    #[test]
    fn scopes_partition_categories() {
        let count = |scope| Category::ALL.iter().filter(|c| c.scope() == scope).count();
        assert_eq!(count(Scope::Scope1), 3);
        assert_eq!(count(Scope::Scope2), 1);
        assert_eq!(count(Scope::Scope3), 17);
        assert_eq!(count(Scope::Financed), 10);
    }

    #[test]
    fn tag_selects_variant() {
        let yaml = r#"
category: stationary_combustion
id: 00000000-0000-0000-0000-000000000007
date: 2024-03-01
fuel_type: Diesel
fuel_use: 100
fuel_unit: litre
"#;
        let record: ActivityRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.category(), Category::StationaryCombustion);
        assert_eq!(record.id(), RecordId::from_u128(7));
        let ActivityRecord::StationaryCombustion(r) = &record else {
            panic!("wrong variant");
        };
        assert_eq!(r.fuel_use, Some(100.0));
        assert_eq!(r.fuel_state, FuelState::Liquid);
        assert_eq!(r.heating_value, None);
        assert_eq!(
            r.meta.date,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn shared_shapes_keep_their_category() {
        let json = r#"{"category":"downstream_transport","freight_type":"Rail","distance_traveled":10.0}"#;
        let record: ActivityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category(), Category::DownstreamTransport);
        assert_eq!(record.scope(), Scope::Scope3);
    }

    #[test]
    fn financed_exposure_is_flattened() {
        let yaml = r#"
category: sovereign_debt
outstanding_amount: 5000000
attribution_share: 0.01
PPP_adj_GDP: 2000000000
"#;
        let record: ActivityRecord = serde_yaml::from_str(yaml).unwrap();
        let ActivityRecord::SovereignDebt(r) = record else {
            panic!("wrong variant");
        };
        assert_eq!(r.exposure.attribution_share, Some(0.01));
        assert_eq!(r.ppp_adjusted_gdp, Some(2.0e9));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = serde_json::from_str::<ActivityRecord>(r#"{"category":"teleportation"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn missing_ids_are_generated() {
        let a: ActivityRecord = serde_json::from_str(r#"{"category":"business_stay"}"#).unwrap();
        let b: ActivityRecord = serde_json::from_str(r#"{"category":"business_stay"}"#).unwrap();
        assert_ne!(a.id(), b.id());
    }
}
