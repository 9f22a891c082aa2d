//! Balance service
//!
//! Snapshots members and bills from storage and runs the balance engine on
//! them. A snapshot that the engine rejects is reported as an error; the
//! service never falls back to showing zero balances.

use serde::Serialize;

use crate::balance::{
    compute_ledger, residual_imbalances, Ledger, SettlementPlanner, SettlementTransfer,
};
use crate::error::{BillError, BillResult};
use crate::models::{Bill, Member, Money};
use crate::storage::Storage;

/// Everything the balances screen shows
#[derive(Debug, Clone, Serialize)]
pub struct BalanceSummary {
    pub members: Vec<Member>,
    pub ledger: Ledger,
    pub transfers: Vec<SettlementTransfer>,
    /// Sum of expense amounts, settle-up payments excluded
    pub total_spending: Money,
    pub bill_count: usize,
    pub settlement_count: usize,
}

impl BalanceSummary {
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }
}

/// Service for balances and settlement plans
pub struct BalanceService<'a> {
    storage: &'a Storage,
    planner: SettlementPlanner,
}

impl<'a> BalanceService<'a> {
    /// Create a balance service using `tolerance` for settlement planning
    pub fn new(storage: &'a Storage, tolerance: Money) -> Self {
        Self {
            storage,
            planner: SettlementPlanner::new(tolerance),
        }
    }

    /// Per-member paid, owed and net totals
    pub fn ledger(&self) -> BillResult<Ledger> {
        let (members, bills) = self.snapshot()?;
        Self::compute(&members, &bills)
    }

    /// Transfers that settle the group, with the ledger they were planned from
    pub fn plan(&self) -> BillResult<(Ledger, Vec<SettlementTransfer>)> {
        let (members, bills) = self.snapshot()?;
        let ledger = Self::compute(&members, &bills)?;
        let transfers = self.plan_for(&members, &ledger);
        Ok((ledger, transfers))
    }

    pub fn summary(&self) -> BillResult<BalanceSummary> {
        let (members, bills) = self.snapshot()?;
        let ledger = Self::compute(&members, &bills)?;
        let transfers = self.plan_for(&members, &ledger);

        let (settlements, expenses): (Vec<_>, Vec<_>) =
            bills.iter().partition(|b| b.is_settlement);

        let total_spending = expenses
            .iter()
            .try_fold(Money::zero(), |acc, b| acc.checked_add(b.amount))
            .ok_or_else(|| BillError::Validation("Total spending overflows".into()))?;

        Ok(BalanceSummary {
            total_spending,
            bill_count: expenses.len(),
            settlement_count: settlements.len(),
            members,
            ledger,
            transfers,
        })
    }

    /// Members and bills read once, so every figure comes from the same data
    fn snapshot(&self) -> BillResult<(Vec<Member>, Vec<Bill>)> {
        let members = self.storage.members.get_all()?;
        let bills = self.storage.bills.get_all()?;
        Ok((members, bills))
    }

    fn compute(members: &[Member], bills: &[Bill]) -> BillResult<Ledger> {
        compute_ledger(members, bills).map_err(|e| {
            tracing::warn!(error = %e, "balances unavailable");
            e
        })
    }

    fn plan_for(&self, members: &[Member], ledger: &Ledger) -> Vec<SettlementTransfer> {
        let transfers = self.planner.plan(members, ledger);

        let residuals = residual_imbalances(ledger, &transfers, self.planner.tolerance());
        for (member, amount) in &residuals {
            tracing::warn!(%member, %amount, "settlement plan leaves a residual balance");
        }

        tracing::info!(
            members = members.len(),
            transfers = transfers.len(),
            "planned settlement"
        );
        transfers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::DEFAULT_TOLERANCE;
    use crate::config::paths::BillPaths;
    use crate::models::MemberId;
    use crate::services::{BillService, MemberService, NewBill};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_members(storage: &Storage, names: &[&str]) -> Vec<Member> {
        let service = MemberService::new(storage);
        names.iter().map(|n| service.add(n, None).unwrap()).collect()
    }

    fn add_bill(storage: &Storage, cents: i64, paid_by: MemberId, participants: Vec<MemberId>) {
        BillService::new(storage)
            .add(NewBill {
                description: "Shared".into(),
                amount: Money::from_cents(cents),
                paid_by,
                participants,
                category: None,
            })
            .unwrap();
    }

    #[test]
    fn test_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let m = add_members(&storage, &["A", "B", "C"]);
        add_bill(&storage, 12000, m[0].id, vec![]);
        add_bill(&storage, 6000, m[1].id, vec![]);

        let summary = BalanceService::new(&storage, DEFAULT_TOLERANCE)
            .summary()
            .unwrap();

        assert_eq!(summary.total_spending, Money::from_cents(18000));
        assert_eq!(summary.bill_count, 2);
        assert_eq!(
            summary.transfers,
            vec![SettlementTransfer {
                from: m[2].id,
                to: m[0].id,
                amount: Money::from_cents(6000),
            }]
        );
    }

    #[test]
    fn test_recorded_settlement_clears_plan() {
        let (_temp_dir, storage) = create_test_storage();
        let m = add_members(&storage, &["A", "B"]);
        add_bill(&storage, 10000, m[0].id, vec![]);

        let service = BalanceService::new(&storage, DEFAULT_TOLERANCE);
        let (_, transfers) = service.plan().unwrap();
        assert_eq!(transfers.len(), 1);

        BillService::new(&storage)
            .record_settlement(transfers[0].from, transfers[0].to, transfers[0].amount)
            .unwrap();

        let summary = service.summary().unwrap();
        assert!(summary.is_settled());
        assert!(summary.ledger.is_settled(DEFAULT_TOLERANCE));
        assert_eq!(summary.total_spending, Money::from_cents(10000));
        assert_eq!(summary.settlement_count, 1);
    }

    #[test]
    fn test_tolerance_from_caller() {
        let (_temp_dir, storage) = create_test_storage();
        let m = add_members(&storage, &["A", "B"]);
        add_bill(&storage, 100, m[0].id, vec![]);

        let strict = BalanceService::new(&storage, DEFAULT_TOLERANCE);
        assert_eq!(strict.plan().unwrap().1.len(), 1);

        let lenient = BalanceService::new(&storage, Money::from_cents(100));
        assert!(lenient.plan().unwrap().1.is_empty());
    }

    #[test]
    fn test_dangling_member_surfaces_error() {
        let (_temp_dir, storage) = create_test_storage();
        let m = add_members(&storage, &["A"]);
        // Written straight to the repository, bypassing service checks
        storage
            .bills
            .upsert(Bill::new("Ghost", Money::from_cents(100), m[0].id, vec![MemberId::new()]))
            .unwrap();

        let service = BalanceService::new(&storage, DEFAULT_TOLERANCE);
        assert!(matches!(
            service.summary(),
            Err(BillError::UnknownMember { .. })
        ));
        assert!(service.ledger().unwrap_err().is_unknown_member());
    }

    #[test]
    fn test_summary_figures_agree() {
        let (_temp_dir, storage) = create_test_storage();
        let m = add_members(&storage, &["A", "B"]);
        add_bill(&storage, 9000, m[0].id, vec![]);
        BillService::new(&storage)
            .record_settlement(m[1].id, m[0].id, Money::from_cents(2000))
            .unwrap();

        let summary = BalanceService::new(&storage, DEFAULT_TOLERANCE)
            .summary()
            .unwrap();

        // Ledger paid totals include settle-up payments; spending does not
        assert_eq!(summary.ledger.total_paid(), Money::from_cents(11000));
        assert_eq!(summary.total_spending, Money::from_cents(9000));
        assert_eq!(summary.bill_count + summary.settlement_count, 2);
        assert_eq!(summary.ledger.len(), summary.members.len());
    }

    #[test]
    fn test_overflowing_bills_surface_error() {
        let (_temp_dir, storage) = create_test_storage();
        let m = add_members(&storage, &["A", "B"]);
        let huge = Money::parse("79228162514264337593543950335").unwrap();
        for description in ["Yacht", "Plane"] {
            storage
                .bills
                .upsert(Bill::new(description, huge, m[0].id, vec![m[1].id]))
                .unwrap();
        }

        let service = BalanceService::new(&storage, DEFAULT_TOLERANCE);
        assert!(matches!(service.summary(), Err(BillError::Validation(_))));
        assert!(matches!(service.plan(), Err(BillError::Validation(_))));
    }
}
