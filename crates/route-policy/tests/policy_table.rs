//! End-to-end tests: YAML fixture -> `PolicyTable` -> decisions.
//!
//! The fixture in `tests/fixtures/policy.yaml` models a typical edge router:
//! martian and too-specific filtering, a customer import policy, and a few
//! policies pinning down the less obvious combination semantics.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use route_policy::{
    loader, DefaultPolicy, PolicyEvent, PolicyObserver, PolicyTable, Route, RouteType,
};

/// Counts events by variant name.
#[derive(Default)]
struct EventLog(Mutex<Vec<String>>);

impl EventLog {
    fn count(&self, variant: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with(variant))
            .count()
    }
}

impl PolicyObserver for EventLog {
    fn on_event(&self, event: &PolicyEvent<'_>) {
        self.0.lock().unwrap().push(format!("{event:?}"));
    }
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/policy.yaml")
}

fn load(observer: Arc<dyn PolicyObserver>) -> PolicyTable {
    let config = loader::load_policy(fixture()).expect("fixture should load");
    PolicyTable::from_config(&config, observer)
}

fn route(cidr: &str, peer: &str) -> Route {
    Route::from_cidr(cidr, peer.parse::<IpAddr>().unwrap()).unwrap()
}

fn verdict(table: &PolicyTable, policy: &str, cidr: &str, peer: &str) -> RouteType {
    table
        .get(policy)
        .unwrap_or_else(|| panic!("policy {policy} missing"))
        .apply(&route(cidr, peer))
        .route_type
}

const CUSTOMER: &str = "192.0.2.10";
const TRANSIT: &str = "192.0.2.1";
const OTHER: &str = "192.0.2.99";

#[test]
fn fixture_builds_all_policies() {
    let table = load(Arc::new(EventLog::default()));
    assert_eq!(table.len(), 5);
}

#[test]
fn bad_prefix_entry_is_reported_once_and_skipped() {
    let log = Arc::new(EventLog::default());
    let table = load(log.clone());
    // customer-a is referenced by one statement only.
    assert_eq!(log.count("PrefixSkipped"), 1);
    assert_eq!(
        verdict(&table, "customer-a-in", "203.0.113.0/24", CUSTOMER),
        RouteType::Reject
    );
}

#[test]
fn martians_are_rejected() {
    let table = load(Arc::new(EventLog::default()));
    for cidr in ["10.1.2.0/24", "172.20.0.0/16", "192.168.1.0/24", "10.0.0.0/8"] {
        assert_eq!(
            verdict(&table, "sanity-in", cidr, TRANSIT),
            RouteType::Reject,
            "{cidr} should be rejected"
        );
    }
    assert_eq!(
        verdict(&table, "sanity-in", "172.32.0.0/16", TRANSIT),
        RouteType::None
    );
}

#[test]
fn too_specific_routes_are_rejected() {
    let table = load(Arc::new(EventLog::default()));
    assert_eq!(
        verdict(&table, "sanity-in", "8.8.8.0/25", TRANSIT),
        RouteType::Reject
    );
    assert_eq!(
        verdict(&table, "sanity-in", "8.8.8.0/24", TRANSIT),
        RouteType::None
    );
    // IPv6 routes are outside both IPv4 sets.
    assert_eq!(
        verdict(&table, "sanity-in", "2001:db8::/128", TRANSIT),
        RouteType::None
    );
}

#[test]
fn customer_import() {
    let table = load(Arc::new(EventLog::default()));
    assert_eq!(
        verdict(&table, "customer-a-in", "198.51.100.0/24", CUSTOMER),
        RouteType::Accept
    );
    assert_eq!(
        verdict(&table, "customer-a-in", "198.51.100.192/26", CUSTOMER),
        RouteType::Accept
    );
    assert_eq!(
        verdict(&table, "customer-a-in", "2001:db8:100::/48", "2001:db8:ffff::10"),
        RouteType::Accept
    );
    // Too long for the 24..26 range, caught by the catch-all statement.
    assert_eq!(
        verdict(&table, "customer-a-in", "198.51.100.0/27", CUSTOMER),
        RouteType::Reject
    );
    // Exact-match IPv6 entry: a more specific is not covered.
    assert_eq!(
        verdict(&table, "customer-a-in", "2001:db8:100:1::/64", "2001:db8:ffff::10"),
        RouteType::Reject
    );
    // Not from the customer at all.
    assert_eq!(
        verdict(&table, "customer-a-in", "198.51.100.0/24", OTHER),
        RouteType::None
    );
}

#[test]
fn invert_accepts_only_when_no_condition_matches() {
    let table = load(Arc::new(EventLog::default()));
    assert_eq!(
        verdict(&table, "clean-non-transit", "8.8.8.0/24", OTHER),
        RouteType::Accept
    );
    assert_eq!(
        verdict(&table, "clean-non-transit", "8.8.8.0/24", TRANSIT),
        RouteType::None
    );
    assert_eq!(
        verdict(&table, "clean-non-transit", "10.0.0.0/8", OTHER),
        RouteType::None
    );
}

#[test]
fn invert_with_unset_prefix_set_never_matches() {
    // The empty prefix condition matches every route, so INVERT always
    // sees a match on its first condition.
    let table = load(Arc::new(EventLog::default()));
    assert_eq!(
        verdict(&table, "invert-without-prefix-set", "8.8.8.0/24", OTHER),
        RouteType::None
    );
    assert_eq!(
        verdict(&table, "invert-without-prefix-set", "8.8.8.0/24", TRANSIT),
        RouteType::None
    );
}

#[test]
fn unrecognized_match_set_option_never_matches() {
    let table = load(Arc::new(EventLog::default()));
    assert_eq!(
        verdict(&table, "broken-mode", "8.8.8.0/24", OTHER),
        RouteType::None
    );
}

#[test]
fn chained_policies_with_default() {
    let table = load(Arc::new(EventLog::default()));
    let chain = ["sanity-in", "customer-a-in"];

    let d = table.evaluate(&chain, DefaultPolicy::RejectRoute, &route("10.0.0.0/8", CUSTOMER));
    assert_eq!(d.route_type, RouteType::Reject);
    assert_eq!(d.policy.as_deref(), Some("sanity-in"));
    assert_eq!(d.statement.as_deref(), Some("reject-martians"));

    let r = route("198.51.100.0/24", CUSTOMER);
    let d = table.evaluate(&chain, DefaultPolicy::RejectRoute, &r);
    assert!(d.is_accepted());
    assert_eq!(d.path, Some(r));

    let d = table.evaluate(&chain, DefaultPolicy::RejectRoute, &route("8.8.8.0/24", OTHER));
    assert_eq!(d.route_type, RouteType::Reject);
    assert!(d.policy.is_none());

    let d = table.evaluate(&chain, DefaultPolicy::AcceptRoute, &route("8.8.8.0/24", OTHER));
    assert!(d.is_accepted());
}

#[test]
fn table_is_shared_across_threads() {
    let table = Arc::new(load(Arc::new(EventLog::default())));
    let cases = [
        ("10.0.0.0/8", RouteType::Reject),
        ("198.51.100.0/24", RouteType::Accept),
        ("198.51.100.0/28", RouteType::Reject),
        ("8.8.8.0/24", RouteType::Reject),
    ];

    let handles: Vec<_> = cases
        .into_iter()
        .map(|(cidr, expected)| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                let d = table.evaluate(
                    &["sanity-in", "customer-a-in"],
                    DefaultPolicy::AcceptRoute,
                    &route(cidr, CUSTOMER),
                );
                assert_eq!(d.route_type, expected, "{cidr}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
