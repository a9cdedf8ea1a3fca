//! Directory ranking and listing flow across the three network crates.

use chrono::{Months, NaiveDate};
use proptest::prelude::*;
use uuid::Uuid;

use network_access::{AccessError, AccessGate, Identity};
use network_directory::{
    listing_feed, publish, rank, Company, CompanyProfile, DirectoryFilter, ListingCategory,
    ListingDraft, SortKey,
};
use network_tiers::{FixedClock, Tier, TierConfig};

fn now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn approved(name: &str, months: u32) -> Company {
    let config = TierConfig::default();
    let clock = FixedClock(now());
    let gate = AccessGate::new(&config, &clock);

    let mut company = Company::new(name);
    company
        .approve(&gate, &Identity::admin(Uuid::now_v7()), now() - Months::new(months))
        .unwrap();
    company
}

#[test]
fn test_rank_by_tier_orders_longest_members_first() {
    let companies = vec![approved("A", 1), approved("B", 40), approved("C", 8)];

    let ranked = rank(
        &companies,
        &DirectoryFilter::default(),
        SortKey::Tier,
        &TierConfig::default(),
        now(),
    );

    let months: Vec<u32> = ranked.iter().map(|r| r.elapsed_months()).collect();
    assert_eq!(months, [40, 8, 1]);
    let tiers: Vec<Tier> = ranked.iter().map(|r| r.tier()).collect();
    assert_eq!(tiers, [Tier::Champion, Tier::Participant, Tier::Explorer]);
}

#[test]
fn test_rank_with_custom_thresholds() {
    let config = TierConfig::from_json(
        r#"{"thresholds": {"participant": 1, "contributor": 2, "champion": 3}}"#,
    )
    .unwrap();
    let companies = vec![approved("A", 1), approved("B", 3), approved("C", 2)];

    let ranked = rank(&companies, &DirectoryFilter::default(), SortKey::Tier, &config, now());
    let tiers: Vec<Tier> = ranked.iter().map(|r| r.tier()).collect();
    assert_eq!(tiers, [Tier::Champion, Tier::Contributor, Tier::Participant]);
}

#[test]
fn test_publish_then_feed_and_profile() {
    let config = TierConfig::default();
    let clock = FixedClock(now());
    let gate = AccessGate::new(&config, &clock);

    let veteran = approved("Veteran", 30);
    let newcomer = approved("Newcomer", 5);

    let veteran_user = Identity::member(Uuid::now_v7(), veteran.id)
        .enrolled_on(veteran.enrolled_on)
        .approved(veteran.is_approved);
    let newcomer_user = Identity::member(Uuid::now_v7(), newcomer.id)
        .enrolled_on(newcomer.enrolled_on)
        .approved(newcomer.is_approved);

    let listing = publish(
        &gate,
        &veteran_user,
        ListingDraft::new("Test bench", "Shared access", ListingCategory::Resource),
    )
    .unwrap();

    let denied = publish(
        &gate,
        &newcomer_user,
        ListingDraft::new("Hackathon", "Weekend event", ListingCategory::Event),
    )
    .unwrap_err();
    assert!(matches!(
        denied,
        AccessError::InsufficientTier {
            held: Tier::Participant,
            required: Tier::Contributor,
            ..
        }
    ));
    assert_eq!(denied.error_code(), "INSUFFICIENT_TIER");

    let listings = vec![listing];
    let companies = vec![veteran, newcomer];

    let feed = listing_feed(&listings, &companies, None, &config, now());
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].company_name, "Veteran");
    assert_eq!(feed[0].company_tier, Tier::Contributor);

    let profile = CompanyProfile::build(&companies[0], &listings, &config, now());
    assert_eq!(profile.listings.len(), 1);
    assert_eq!(profile.membership_duration.as_deref(), Some("2 years, 6 months"));
    assert_eq!(profile.standing.progression.months_until_next, Some(6));
}

fn arb_companies() -> impl Strategy<Value = (Vec<Company>, Vec<usize>)> {
    let names = vec!["Acme", "acme", "Beta", "Gamma", "delta"];
    prop::collection::vec((prop::sample::select(names), 0u32..60), 1..12).prop_flat_map(
        |entries| {
            let companies: Vec<Company> = entries
                .into_iter()
                .map(|(name, months)| approved(name, months))
                .collect();
            let order: Vec<usize> = (0..companies.len()).collect();
            (Just(companies), Just(order).prop_shuffle())
        },
    )
}

fn arb_sort() -> impl Strategy<Value = SortKey> {
    prop::sample::select(vec![SortKey::Name, SortKey::Duration, SortKey::Tier])
}

proptest! {
    #[test]
    fn ranking_ignores_input_order((companies, order) in arb_companies(), sort in arb_sort()) {
        let config = TierConfig::default();
        let shuffled: Vec<Company> = order.iter().map(|&i| companies[i].clone()).collect();

        let ids = |list: &[Company]| -> Vec<Uuid> {
            rank(list, &DirectoryFilter::default(), sort, &config, now())
                .iter()
                .map(|r| r.entry.id)
                .collect()
        };
        prop_assert_eq!(ids(&companies), ids(&shuffled));
    }

    #[test]
    fn tier_ranking_is_non_increasing((companies, _order) in arb_companies()) {
        let config = TierConfig::default();
        let ranked = rank(&companies, &DirectoryFilter::default(), SortKey::Tier, &config, now());

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].tier() >= pair[1].tier());
            if pair[0].tier() == pair[1].tier() {
                prop_assert!(pair[0].elapsed_months() >= pair[1].elapsed_months());
            }
        }
    }
}
