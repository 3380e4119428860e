mod criteria;

pub use criteria::{CriteriaUpdate, FilterCriteria};

use log::debug;

use crate::catalog::{OrbitClass, SatelliteRecord};

/// Applies a [`FilterCriteria`] to catalog records.
///
/// The engine is an immutable value; `update` returns a new engine and leaves the
/// receiver as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterEngine {
    criteria: FilterCriteria,
}

impl FilterEngine {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self { criteria }
    }

    /// Engine that only lets operational-ish records through.
    pub fn active_only() -> Self {
        Self::default().update(CriteriaUpdate::new().active(Some(true)))
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn update(&self, change: CriteriaUpdate) -> Self {
        Self {
            criteria: self.criteria.update(change),
        }
    }

    pub fn matches(&self, record: &SatelliteRecord) -> bool {
        let c = &self.criteria;

        if let Some(active) = c.active() {
            if record.is_active() != active {
                return false;
            }
        }
        if let Some(min) = c.min_launch() {
            if record.launch_date < min {
                return false;
            }
        }
        if let Some(max) = c.max_launch() {
            if record.launch_date > max {
                return false;
            }
        }
        if !c.orbit_classes().is_empty()
            && !record
                .orbit_class
                .is_some_and(|class| c.orbit_classes().contains(&class))
        {
            return false;
        }
        if !c.owners().is_empty() && !c.owners().contains(&record.owner) {
            return false;
        }
        if !c.user_types().is_empty() && c.user_types().is_disjoint(&record.users) {
            return false;
        }
        if !c.purposes().is_empty() && c.purposes().is_disjoint(&record.purpose) {
            return false;
        }
        true
    }

    pub fn filter<'a>(&self, records: &'a [SatelliteRecord]) -> Vec<&'a SatelliteRecord> {
        let matched: Vec<_> = records.iter().filter(|r| self.matches(r)).collect();
        debug!(
            "Filtered {} of {} records using {:?}",
            matched.len(),
            records.len(),
            self.criteria
        );
        matched
    }

    /// How many records would match if `change` were applied. The engine itself is
    /// not touched.
    pub fn count_if(&self, records: &[SatelliteRecord], change: CriteriaUpdate) -> usize {
        let scratch = self.update(change);
        records.iter().filter(|r| scratch.matches(r)).count()
    }

    /// Option counts for an orbit class picker: `None` is "all classes", followed by each
    /// class on its own, everything else held at the current criteria.
    pub fn orbit_class_counts(
        &self,
        records: &[SatelliteRecord],
    ) -> Vec<(Option<OrbitClass>, usize)> {
        std::iter::once(None)
            .chain(OrbitClass::ALL.into_iter().map(Some))
            .map(|class| {
                let change = CriteriaUpdate::new().orbit_classes(class);
                (class, self.count_if(records, change))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OperationalStatus;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sat(id: &str, class: Option<OrbitClass>, launch: NaiveDate) -> SatelliteRecord {
        let mut r = SatelliteRecord::new(id, id, launch);
        r.orbit_class = class;
        r
    }

    fn catalog() -> Vec<SatelliteRecord> {
        let mut iss = sat("1998-067A", Some(OrbitClass::Leo), date(1998, 11, 20));
        iss.operational_status = OperationalStatus::PartiallyOperational;
        iss.owner = "ISS".into();
        iss.users = ["Civil", "Government"].map(String::from).into();
        iss.purpose = ["Space Science"].map(String::from).into();

        let mut gps = sat("2018-109A", Some(OrbitClass::Meo), date(2018, 12, 23));
        gps.operational_status = OperationalStatus::Operational;
        gps.owner = "US".into();
        gps.users = ["Military"].map(String::from).into();
        gps.purpose = ["Navigation/Global Positioning"].map(String::from).into();

        let mut intelsat = sat("2001-019A", Some(OrbitClass::Geo), date(2001, 5, 1));
        intelsat.operational_status = OperationalStatus::Extended;
        intelsat.owner = "ITSO".into();
        intelsat.users = ["Commercial"].map(String::from).into();
        intelsat.purpose = ["Communications"].map(String::from).into();

        let mut debris = sat("1965-027B", None, date(1965, 4, 6));
        debris.operational_status = OperationalStatus::Decayed;
        debris.owner = "US".into();

        vec![iss, gps, intelsat, debris]
    }

    fn ids(records: &[&SatelliteRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn unconstrained_matches_everything() {
        let engine = FilterEngine::default();
        assert!(catalog().iter().all(|r| engine.matches(r)));
    }

    #[test]
    fn orbit_class_filter() {
        let change = CriteriaUpdate::new().orbit_classes([OrbitClass::Leo]);
        let engine = FilterEngine::default().update(change);
        for r in catalog() {
            assert_eq!(
                engine.matches(&r),
                r.orbit_class == Some(OrbitClass::Leo),
                "{}",
                r.id
            );
        }
    }

    #[rstest]
    #[case(Some(date(2005, 1, 1)), false)]
    #[case(None, true)]
    #[case(Some(date(2001, 5, 1)), true)]
    fn min_launch_bound(#[case] min: Option<NaiveDate>, #[case] expected: bool) {
        let intelsat = sat("2001-019A", Some(OrbitClass::Geo), date(2001, 5, 1));
        let engine = FilterEngine::default().update(CriteriaUpdate::new().min_launch(min));
        assert_eq!(engine.matches(&intelsat), expected);
    }

    #[test]
    fn max_launch_bound() {
        let change = CriteriaUpdate::new().max_launch(Some(date(2000, 1, 1)));
        let engine = FilterEngine::default().update(change);
        assert_eq!(ids(&engine.filter(&catalog())), ["1998-067A", "1965-027B"]);
    }

    #[rstest]
    #[case(Some(true), 3)]
    #[case(Some(false), 1)]
    #[case(None, 4)]
    fn active_tri_state(#[case] active: Option<bool>, #[case] expected: usize) {
        let engine = FilterEngine::default().update(CriteriaUpdate::new().active(active));
        assert_eq!(engine.filter(&catalog()).len(), expected);
    }

    #[test]
    fn tag_sets_need_overlap() {
        let records = catalog();
        let change = CriteriaUpdate::new().user_types(["Civil", "Commercial"]);
        let engine = FilterEngine::default().update(change);
        assert_eq!(engine.filter(&records).len(), 2);

        let engine = engine.update(CriteriaUpdate::new().purposes(["Communications"]));
        assert_eq!(ids(&engine.filter(&records)), ["2001-019A"]);
    }

    #[test]
    fn owner_filter() {
        let engine = FilterEngine::default().update(CriteriaUpdate::new().owners(["US"]));
        assert_eq!(engine.filter(&catalog()).len(), 2);
    }

    #[test]
    fn count_if_leaves_engine_alone() {
        let records = catalog();
        let engine = FilterEngine::active_only();
        let before = engine.clone();

        let change = CriteriaUpdate::new().orbit_classes([OrbitClass::Geo]);
        let geo = engine.count_if(&records, change);
        assert_eq!(geo, 1);
        let all = engine.count_if(&records, CriteriaUpdate::new().active(None));
        assert_eq!(all, 4);
        assert_eq!(engine, before);
        assert_eq!(engine.filter(&records).len(), 3);
    }

    #[test]
    fn class_option_counts() {
        let records = catalog();
        let counts = FilterEngine::default().orbit_class_counts(&records);
        assert_eq!(
            counts,
            vec![
                (None, 4),
                (Some(OrbitClass::Leo), 1),
                (Some(OrbitClass::Geo), 1),
                (Some(OrbitClass::Meo), 1),
                (Some(OrbitClass::Elliptical), 0),
            ]
        );
    }
}
