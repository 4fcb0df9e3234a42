use crate::{Avl, Balance, Handle, RedBlack, TreeError, TreeMap};

use crate::check::Audit;
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Keys are drawn from a small range so that operations collide often.
#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 50)]
    Insert(#[proptest(strategy = "0u16..512")] u16, u32),
    #[proptest(weight = 30)]
    Erase(#[proptest(strategy = "0u16..512")] u16),
    #[proptest(weight = 10)]
    Get(#[proptest(strategy = "0u16..512")] u16),
    #[proptest(weight = 4)]
    LowerBound(#[proptest(strategy = "0u16..512")] u16),
    #[proptest(weight = 4)]
    UpperBound(#[proptest(strategy = "0u16..512")] u16),
    #[proptest(weight = 1)]
    Clear,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(any::<Op>(), 0..=1500)
}

fn key_at<B: Balance>(t: &TreeMap<u16, u32, B>, h: Handle) -> Option<u16> {
    t.entry(h).ok().map(|(k, _)| *k)
}

fn run_against_btree<B: Balance>(ops: Vec<Op>) -> Result<(), TestCaseError>
where
    TreeMap<u16, u32, B>: Audit,
{
    let mut t: TreeMap<u16, u32, B> = TreeMap::new();
    let mut m: BTreeMap<u16, u32> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert(key, value) => {
                let h = t.insert(key, value);
                let expected = *m.entry(key).or_insert(value);
                prop_assert_eq!(t.entry(h).map(|(k, v)| (*k, *v)), Ok((key, expected)));
            }
            Op::Erase(key) => {
                let got = t.erase(&key);
                if m.remove(&key).is_some() {
                    let successor = m.range(key..).next().map(|(k, _)| *k);
                    prop_assert!(got.is_ok());
                    prop_assert_eq!(got.ok().and_then(|h| key_at(&t, h)), successor);
                } else {
                    prop_assert_eq!(got, Err(TreeError::KeyNotFound));
                }
            }
            Op::Get(key) => {
                prop_assert_eq!(t.get(&key), m.get(&key));
                prop_assert_eq!(t.contains_key(&key), m.contains_key(&key));
            }
            Op::LowerBound(key) => {
                let expected = m.range(key..).next().map(|(k, _)| *k);
                prop_assert_eq!(key_at(&t, t.lower_bound(&key)), expected);
            }
            Op::UpperBound(key) => {
                let expected = m
                    .range((Bound::Excluded(key), Bound::Unbounded))
                    .next()
                    .map(|(k, _)| *k);
                prop_assert_eq!(key_at(&t, t.upper_bound(&key)), expected);
            }
            Op::Clear => {
                t.clear();
                m.clear();
            }
        }

        prop_assert_eq!(t.len(), m.len());
    }

    t.audit();
    let got: Vec<(u16, u32)> = t.iter().map(|(k, v)| (*k, *v)).collect();
    let expected: Vec<(u16, u32)> = m.into_iter().collect();
    prop_assert_eq!(got, expected);
    Ok(())
}

fn run_insert_erase_duality<B: Balance>(keys: Vec<u16>, extra: u16) -> Result<(), TestCaseError>
where
    TreeMap<u16, u32, B>: Audit,
{
    let mut t: TreeMap<u16, u32, B> = TreeMap::new();
    for k in keys {
        if k != extra {
            t.insert(k, u32::from(k));
        }
    }
    let before: Vec<u16> = t.keys().copied().collect();
    let len = t.len();

    t.insert(extra, 0);
    prop_assert_eq!(t.len(), len + 1);
    t.erase(&extra).map_err(|e| TestCaseError::fail(e.to_string()))?;
    t.audit();

    prop_assert_eq!(t.len(), len);
    prop_assert!(t.find(&extra).is_end());
    let after: Vec<u16> = t.keys().copied().collect();
    prop_assert_eq!(before, after);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_avl(ops in ops_strategy()) {
        run_against_btree::<Avl>(ops)?;
    }

    #[test]
    fn prop_equivalence_rb(ops in ops_strategy()) {
        run_against_btree::<RedBlack>(ops)?;
    }

    #[test]
    fn prop_insert_erase_duality_avl(keys in prop::collection::vec(any::<u16>(), 0..300), extra in any::<u16>()) {
        run_insert_erase_duality::<Avl>(keys, extra)?;
    }

    #[test]
    fn prop_insert_erase_duality_rb(keys in prop::collection::vec(any::<u16>(), 0..300), extra in any::<u16>()) {
        run_insert_erase_duality::<RedBlack>(keys, extra)?;
    }
}

fn scale_scenario<B: Balance>()
where
    TreeMap<u64, u64, B>: Audit,
{
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    let mut rng = StdRng::seed_from_u64(1000);
    let mut seen = HashSet::new();
    let mut keys = Vec::with_capacity(1000);
    while keys.len() < 1000 {
        let k: u64 = rng.gen();
        if seen.insert(k) {
            keys.push(k);
        }
    }

    let mut t: TreeMap<u64, u64, B> = TreeMap::new();
    for (i, &k) in keys.iter().enumerate() {
        t.insert(k, k ^ 0xA5A5);
        t.audit();
        assert_eq!(t.len(), i + 1);
    }
    for &k in &keys {
        let h = t.find(&k);
        assert_eq!(t.entry(h), Ok((&k, &(k ^ 0xA5A5))));
    }

    let mut prev = None;
    for (k, _) in &t {
        assert!(prev < Some(*k), "iteration must be strictly ascending");
        prev = Some(*k);
    }
    assert_eq!(t.iter().count(), t.len());
}

#[test]
fn scale_scenario_avl() {
    scale_scenario::<Avl>();
}

#[test]
fn scale_scenario_rb() {
    scale_scenario::<RedBlack>();
}

pub(crate) fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

fn exhaustive_insert_order<B: Balance>()
where
    TreeMap<u32, u32, B>: Audit,
{
    let keys: Vec<u32> = vec![10, 20, 30, 40, 50, 60, 70];

    for_each_permutation(&keys, |perm| {
        let mut t: TreeMap<u32, u32, B> = TreeMap::new();
        for (i, k) in perm.into_iter().enumerate() {
            t.insert(k, i as u32);
            t.audit();
        }
        let got: Vec<u32> = t.keys().copied().collect();
        assert_eq!(got, keys);
    });
}

#[test]
fn exhaustive_insert_order_avl() {
    exhaustive_insert_order::<Avl>();
}

#[test]
fn exhaustive_insert_order_rb() {
    exhaustive_insert_order::<RedBlack>();
}

fn exhaustive_erase_order<B: Balance>()
where
    TreeMap<u32, u32, B>: Audit,
{
    // Each base tree is built in a different order so that erasure starts
    // from differently shaped (and, for red-black, differently coloured)
    // trees.
    let build_orders: [[u32; 6]; 3] = [
        [1, 2, 3, 4, 5, 6],
        [6, 5, 4, 3, 2, 1],
        [3, 1, 5, 2, 6, 4],
    ];

    for order in build_orders {
        let mut base: TreeMap<u32, u32, B> = TreeMap::new();
        for k in order {
            base.insert(k, k * 10);
        }

        for_each_permutation(&order, |perm| {
            let mut t = base.clone();
            let mut remaining: Vec<u32> = order.to_vec();
            remaining.sort_unstable();

            for k in perm {
                let next = t.erase(&k).unwrap();
                remaining.retain(|r| *r != k);
                let expected = remaining.iter().copied().find(|r| *r > k);
                assert_eq!(t.entry(next).ok().map(|(k, _)| *k), expected);
                assert_eq!(t.len(), remaining.len());
                t.audit();
            }
            assert!(t.is_empty());
            assert!(t.node(t.root()).unwrap().is_sentinel());
        });
    }
}

#[test]
fn exhaustive_erase_order_avl() {
    exhaustive_erase_order::<Avl>();
}

#[test]
fn exhaustive_erase_order_rb() {
    exhaustive_erase_order::<RedBlack>();
}
