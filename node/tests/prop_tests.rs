use proptest::prelude::*;

use dao_governance::VoteSide;
use dao_node::{DaoSnapshot, DaoState};
use dao_nullables::NullCollateral;
use dao_types::{AccountAddress, GovernanceParams, ProposalId, ShareAmount, Timestamp};

#[derive(Clone, Debug)]
enum Op {
    Deposit(usize, u128),
    Withdraw(usize, u128),
    Propose(usize, u8),
    Vote(usize, u8, bool),
    Advance(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..5, 0u128..300).prop_map(|(a, n)| Op::Deposit(a, n)),
        (0usize..5, 0u128..300).prop_map(|(a, n)| Op::Withdraw(a, n)),
        (0usize..5, 0u8..4).prop_map(|(a, p)| Op::Propose(a, p)),
        (0usize..5, 0u8..4, any::<bool>()).prop_map(|(a, p, y)| Op::Vote(a, p, y)),
        (0u64..200_000).prop_map(Op::Advance),
    ]
}

fn account(i: usize) -> AccountAddress {
    AccountAddress::new(format!("acct{i}"))
}

fn proposal(i: u8) -> ProposalId {
    ProposalId::from_label(&format!("proposal-{i}"))
}

proptest! {
    /// Whatever sequence of operations runs (including failing ones), total
    /// shares equal the sum of balances and the collateral in custody, and a
    /// snapshot restores to an identical state.
    #[test]
    fn random_operations_preserve_state_invariants(ops in prop::collection::vec(op(), 1..60)) {
        let mut collateral = NullCollateral::new();
        for i in 0..5 {
            collateral.fund(&account(i), 1_000);
        }
        let mut state = DaoState::new(GovernanceParams::default());
        let mut now = Timestamp::new(1_000);

        for op in ops {
            match op {
                Op::Deposit(a, n) => {
                    let _ = state.deposit(&mut collateral, &account(a), ShareAmount::new(n));
                }
                Op::Withdraw(a, n) => {
                    let _ = state.withdraw(&mut collateral, &account(a), ShareAmount::new(n));
                }
                Op::Propose(a, p) => {
                    let _ = state.create_proposal(&account(a), proposal(p), now);
                }
                Op::Vote(a, p, yes) => {
                    let side = if yes { VoteSide::Yes } else { VoteSide::No };
                    let before = state.get_proposal(&proposal(p)).ok().map(|prop| prop.tally());
                    if state.vote(&account(a), &proposal(p), side, now).is_err() {
                        let after = state.get_proposal(&proposal(p)).ok().map(|prop| prop.tally());
                        prop_assert_eq!(before, after);
                    }
                }
                Op::Advance(secs) => now = now.plus_secs(secs),
            }

            state.verify_invariants().unwrap();
            prop_assert_eq!(state.total_shares().raw(), collateral.custody_balance());
            prop_assert_eq!(collateral.total_supply(), 5_000);
        }

        let bytes = state.to_snapshot().encode().unwrap();
        let restored = DaoState::from_snapshot(
            GovernanceParams::default(),
            DaoSnapshot::decode(&bytes).unwrap(),
        )
        .unwrap();
        prop_assert_eq!(restored.to_snapshot(), state.to_snapshot());
    }
}
