use std::sync::OnceLock;

use crate::error::CompareError;
use crate::query::QueryVector;
use crate::relop::Relop;
use crate::source::{HostVersionSource, StaticSource};
use crate::version::HostVersion;

/// Compares the host version against caller-supplied version vectors.
///
/// The host version is resolved from the source on first use and cached
/// for the lifetime of the comparator. Two threads racing on the first call
/// may both query the source; whichever stores first wins and both see it.
pub struct VersionComparator<S> {
    source: S,
    host: OnceLock<HostVersion>,
}

impl<S: HostVersionSource> VersionComparator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            host: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The cached host version, resolving it if this is the first call.
    pub fn host_version(&self) -> Result<HostVersion, CompareError> {
        if let Some(v) = self.host.get() {
            return Ok(*v);
        }
        let raw = self.source.version_string()?;
        let parsed = HostVersion::parse(&raw)?;
        tracing::debug!(
            source = %self.source.describe(),
            raw = %raw.trim(),
            host_version = %parsed,
            "resolved host version"
        );
        Ok(*self.host.get_or_init(|| parsed))
    }

    /// `host <op> query`, comparing only as many leading components as the
    /// query supplies.
    pub fn compare(&self, op: Relop, query: &QueryVector) -> Result<bool, CompareError> {
        let host = self.host_version()?;
        Ok(compare_with(&host, op, query))
    }

    /// Validated entry point taking the operator token and raw numbers.
    pub fn is_host_version(&self, op: &str, query: &[f64]) -> Result<bool, CompareError> {
        let query = QueryVector::from_f64(query)?;
        let op: Relop = op.parse()?;
        self.compare(op, &query)
    }
}

impl VersionComparator<StaticSource> {
    /// A comparator whose host version is already known.
    pub fn with_host_version(host: HostVersion) -> Self {
        let comparator = Self::new(StaticSource::new(host.to_string()));
        let _ = comparator.host.set(host);
        comparator
    }
}

/// Lexicographic comparison of `host` against `query`, stopping at the
/// first differing component. Host components past the query are ignored.
pub fn compare_with(host: &HostVersion, op: Relop, query: &QueryVector) -> bool {
    let first_difference = host
        .prefix(query.len())
        .iter()
        .zip(query.components())
        .map(|(h, q)| i64::from(*h).cmp(q))
        .find(|ord| ord.is_ne());
    let result = op.evaluate(first_difference);
    tracing::trace!(
        host = %host,
        op = %op,
        query = ?query.components(),
        result,
        "compared host version"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostVersionError;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn r2009a() -> VersionComparator<StaticSource> {
        VersionComparator::new(StaticSource::new("7.8.0.342 (R2009a)"))
    }

    #[test]
    fn documented_scenarios() {
        let c = r2009a();
        assert!(c.is_host_version("<=", &[7.0]).unwrap());
        assert!(c.is_host_version(">", &[6.0]).unwrap());
        assert!(!c.is_host_version("<", &[7.0, 8.0]).unwrap());
        assert!(c.is_host_version("<=", &[7.0, 8.0]).unwrap());
        assert!(!c.is_host_version(">", &[7.0, 8.0, 0.0, 342.0]).unwrap());
        assert!(c.is_host_version("==", &[7.0]).unwrap());
        assert!(!c.is_host_version("==", &[7.0, 10.0]).unwrap());
        assert!(!c.is_host_version(">", &[7.0, 8.0, 0.0]).unwrap());
    }

    #[test]
    fn minor_ten_is_newer_than_minor_eight() {
        let c = VersionComparator::new(StaticSource::new("7.10.0.499 (R2010a)"));
        assert!(c.is_host_version(">", &[7.0, 8.0]).unwrap());
        assert!(c.is_host_version(">=", &[7.0, 10.0]).unwrap());
        assert!(!c.is_host_version("<", &[7.0, 1.0]).unwrap());
    }

    #[test]
    fn full_length_reflexivity() {
        let c = r2009a();
        let q = [7.0, 8.0, 0.0, 342.0];
        assert!(c.is_host_version("<=", &q).unwrap());
        assert!(c.is_host_version(">=", &q).unwrap());
        assert!(!c.is_host_version("<", &q).unwrap());
        assert!(!c.is_host_version(">", &q).unwrap());
        assert!(c.is_host_version("==", &q).unwrap());
    }

    #[test]
    fn invalid_operators_fail_with_bad_relop() {
        let c = r2009a();
        for bad in ["!=", "=", "<<"] {
            assert_eq!(
                c.is_host_version(bad, &[7.0]).unwrap_err(),
                CompareError::BadRelop(bad.to_string())
            );
        }
    }

    #[test]
    fn bad_lengths_fail_before_operator_check() {
        let c = r2009a();
        assert_eq!(c.is_host_version("==", &[]).unwrap_err(), CompareError::BadQueryLength(0));
        assert_eq!(
            c.is_host_version("!=", &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap_err(),
            CompareError::BadQueryLength(5)
        );
    }

    #[test]
    fn fractional_first_element_is_rejected() {
        let c = r2009a();
        assert!(matches!(
            c.is_host_version("<", &[7.5, 8.0]).unwrap_err(),
            CompareError::BadQueryValue(_)
        ));
        assert!(c.is_host_version("==", &[7.0, 8.7]).unwrap());
    }

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        version: &'static str,
    }

    impl HostVersionSource for CountingSource {
        fn describe(&self) -> String {
            "counting".to_string()
        }

        fn version_string(&self) -> Result<String, HostVersionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.version.to_string())
        }
    }

    #[test]
    fn host_version_is_resolved_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = VersionComparator::new(CountingSource {
            calls: calls.clone(),
            version: "0.9.1",
        });
        for _ in 0..5 {
            assert!(c.is_host_version("<", &[1.0]).unwrap());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn invalid_call_does_not_query_host() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = VersionComparator::new(CountingSource {
            calls: calls.clone(),
            version: "1.0",
        });
        assert!(c.is_host_version("!=", &[1.0]).is_err());
        assert!(c.is_host_version("<", &[]).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn concurrent_first_use_sees_one_snapshot() {
        let c = Arc::new(r2009a());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let c = c.clone();
                std::thread::spawn(move || c.host_version().unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), HostVersion::new([7, 8, 0, 342]));
        }
    }

    #[test]
    fn unparseable_host_is_an_error_not_a_default() {
        let c = VersionComparator::new(StaticSource::new("unknown"));
        let err = c.is_host_version("==", &[0.0]).unwrap_err();
        assert!(matches!(err, CompareError::HostVersion(HostVersionError::Unparseable(_))));
    }

    #[test]
    fn eager_comparator_skips_source() {
        let c = VersionComparator::with_host_version(HostVersion::new([1, 2, 3, 4]));
        assert_eq!(c.host_version().unwrap(), HostVersion::new([1, 2, 3, 4]));
        assert!(c.compare(Relop::Ge, &QueryVector::new(&[1, 2]).unwrap()).unwrap());
    }

    fn any_host() -> impl Strategy<Value = HostVersion> {
        prop::array::uniform4(0u32..20).prop_map(HostVersion::new)
    }

    fn any_query() -> impl Strategy<Value = QueryVector> {
        prop::collection::vec(-2i64..22, 1..=4).prop_map(|v| QueryVector::new(&v).unwrap())
    }

    proptest! {
        #[test]
        fn prop_strict_is_negation_of_inclusive(host in any_host(), q in any_query()) {
            let lt = compare_with(&host, Relop::Lt, &q);
            let gt = compare_with(&host, Relop::Gt, &q);
            prop_assert_eq!(lt, !compare_with(&host, Relop::Ge, &q));
            prop_assert_eq!(gt, !compare_with(&host, Relop::Le, &q));
        }

        #[test]
        fn prop_every_prefix_is_equal(host in any_host(), len in 1usize..=4) {
            let prefix: Vec<i64> = host.prefix(len).iter().map(|c| i64::from(*c)).collect();
            let q = QueryVector::new(&prefix).unwrap();
            prop_assert!(compare_with(&host, Relop::Eq, &q));
        }

        #[test]
        fn prop_perturbed_prefix_is_not_equal(
            host in any_host(),
            len in 1usize..=4,
            at in 0usize..4,
            delta in 1i64..5,
        ) {
            let mut prefix: Vec<i64> = host.prefix(len).iter().map(|c| i64::from(*c)).collect();
            let at = at % len;
            prefix[at] += delta;
            let q = QueryVector::new(&prefix).unwrap();
            prop_assert!(!compare_with(&host, Relop::Eq, &q));
        }

        #[test]
        fn prop_fourth_component_is_ignored_for_three(
            a in 0u32..20,
            b in 0u32..20,
            c in 0u32..20,
            d1 in 0u32..1000,
            d2 in 0u32..1000,
        ) {
            let q = QueryVector::new(&[i64::from(a), i64::from(b), i64::from(c)]).unwrap();
            for op in Relop::ALL {
                prop_assert_eq!(
                    compare_with(&HostVersion::new([a, b, c, d1]), op, &q),
                    compare_with(&HostVersion::new([a, b, c, d2]), op, &q)
                );
            }
        }

        #[test]
        fn prop_matches_slice_ordering(host in any_host(), q in any_query()) {
            let h: Vec<i64> = host.prefix(q.len()).iter().map(|c| i64::from(*c)).collect();
            let expected = h.as_slice().cmp(q.components());
            prop_assert_eq!(compare_with(&host, Relop::Lt, &q), expected.is_lt());
            prop_assert_eq!(compare_with(&host, Relop::Ge, &q), expected.is_ge());
            prop_assert_eq!(compare_with(&host, Relop::Eq, &q), expected.is_eq());
        }
    }
}
