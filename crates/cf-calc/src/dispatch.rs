//! Record dispatch: one calculator per category.

use crate::context::CalcContext;
use crate::error::CalcResult;
use crate::method::MethodSet;
use crate::scope3::{CAPITAL_GOODS_COST, PURCHASED_GOODS_COST};
use crate::{financed, scope1, scope2, scope3};
use cf_records::ActivityRecord;

/// Run the calculator for `record`'s category.
///
/// Only lookups the calculator cannot do without (grid factors) fail; everything else
/// skips the method that needed it.
pub fn evaluate(record: &ActivityRecord, ctx: &mut CalcContext<'_>) -> CalcResult<MethodSet> {
    use ActivityRecord as R;

    match record {
        R::StationaryCombustion(r) => scope1::stationary_combustion(r, ctx),
        R::MobileCombustion(r) => scope1::mobile_combustion(r, ctx),
        R::FugitiveEmission(r) => scope1::fugitive_emission(r, ctx),

        R::PurchasedPower(r) => scope2::purchased_power(r, ctx),

        R::PurchasedGoods(r) => Ok(scope3::supplier_goods(r, PURCHASED_GOODS_COST)),
        R::CapitalGoods(r) => Ok(scope3::supplier_goods(r, CAPITAL_GOODS_COST)),
        R::EnergyRelated(r) => Ok(scope3::energy_related(r)),
        R::UpstreamTransport(r) | R::DownstreamTransport(r) => scope3::transport(r, ctx),
        R::WasteGenerated(r) | R::EndOfLifeTreatment(r) => scope3::waste(r, ctx),
        R::BusinessTravel(r) => scope3::business_travel(r, ctx),
        R::BusinessStay(r) => Ok(scope3::business_stay(r)),
        R::EmployeeCommute(r) => scope3::employee_commute(r, ctx),
        R::UpstreamLeasedEstate(r) | R::DownstreamLeasedEstate(r) | R::Franchise(r) => {
            scope3::premises(r, ctx)
        }
        R::UpstreamLeasedAuto(r) | R::DownstreamLeasedAuto(r) => scope3::leased_auto(r, ctx),
        R::ProcessingProducts(r) => scope3::processing_products(r, ctx),
        R::UseOfSold(r) => scope3::use_of_sold(r, ctx),

        R::ListedEquity(r) => Ok(financed::listed_equity(r)),
        R::UnlistedEquity(r) | R::CorporateBonds(r) => Ok(financed::corporate_finance(r)),
        R::BusinessLoans(r) => Ok(financed::business_loan(r)),
        R::CommercialRealEstate(r) | R::Mortgage(r) => Ok(financed::property_loan(r)),
        R::VehicleLoans(r) => Ok(financed::vehicle_loan(r)),
        R::ProjectFinance(r) => Ok(financed::project_finance(r)),
        R::EmissionRemovals(r) => Ok(financed::emission_removal(r)),
        R::SovereignDebt(r) => Ok(financed::sovereign_debt(r)),
    }
}
