extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, AuthorizedFunction, AuthorizedInvocation},
    vec, Address, IntoVal, Symbol,
};

use super::setup::{tokens, StakerSetup};
use crate::msg::PositionResponse;

#[test]
fn whitelist_membership() {
    let setup = StakerSetup::new();

    assert!(setup
        .staker
        .query_is_whitelisted(&setup.stake_token.address));
    assert!(setup
        .staker
        .query_is_whitelisted(&setup.other_stake_token.address));
    assert!(!setup
        .staker
        .query_is_whitelisted(&setup.reward_token.address));
    assert_eq!(
        setup.staker.query_whitelist(),
        vec![
            &setup.env,
            setup.stake_token.address.clone(),
            setup.other_stake_token.address.clone(),
        ]
    );
}

#[test]
fn positions_are_reported_for_any_address() {
    let setup = StakerSetup::new();
    let user = Address::generate(&setup.env);
    let auditor = Address::generate(&setup.env);
    setup.fund_rewards(tokens(1_000));
    setup.give_stake(&user, tokens(100));

    setup
        .staker
        .deposit(&user, &setup.stake_token.address, &tokens(100));
    setup.set_day(180);
    setup.staker.withdraw(&user);

    // fully withdrawn history stays queryable
    let expected = vec![
        &setup.env,
        PositionResponse {
            stake_token: setup.stake_token.address.clone(),
            principal: tokens(100),
            total_reward: tokens(125),
            withdrawn: tokens(125),
            start_time: 0,
        },
    ];
    assert_eq!(setup.staker.query_positions(&user).positions, expected);
    assert_eq!(setup.staker.query_my_positions(&user).positions, expected);
    assert_eq!(setup.staker.query_positions(&auditor).positions.len(), 0);
}

#[test]
fn self_queries_require_the_caller() {
    let setup = StakerSetup::new();
    let user = Address::generate(&setup.env);
    setup.fund_rewards(tokens(1_000));
    setup.give_stake(&user, tokens(100));
    setup
        .staker
        .deposit(&user, &setup.stake_token.address, &tokens(100));

    setup.set_day(120);
    assert_eq!(
        setup.staker.query_my_available(&user),
        41_666_666_666_666_666_666
    );
    assert_eq!(
        setup.env.auths(),
        std::vec![(
            user.clone(),
            AuthorizedInvocation {
                function: AuthorizedFunction::Contract((
                    setup.staker.address.clone(),
                    Symbol::new(&setup.env, "query_my_available"),
                    (&user,).into_val(&setup.env),
                )),
                sub_invocations: std::vec![],
            }
        )]
    );
}
