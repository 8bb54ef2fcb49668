//! Helpers for integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime};
use tourism_catalog::domain::geo::GeoLookup;
use tourism_catalog::domain::record::ContentRecord;
use tourism_catalog::domain::types::{ActorId, CityId, CountryId, ProvinceId, RecordId};
use tourism_catalog::repository::{
    ContentReader, ContentWriter, RecordListQuery, RepositoryResult,
};
use tourism_catalog::services::{ActorProvider, Clock};

/// Routes `log` output through the test harness.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn at(secs: i64) -> NaiveDateTime {
    DateTime::from_timestamp(secs, 0)
        .expect("valid timestamp")
        .naive_utc()
}

pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub struct StaticActor(pub &'static str);

impl ActorProvider for StaticActor {
    fn current_actor(&self) -> Option<ActorId> {
        ActorId::new(self.0).ok()
    }
}

/// Saudi Arabia and Egypt with a handful of provinces and cities.
#[derive(Default)]
pub struct Atlas {
    provinces: HashMap<&'static str, &'static str>,
    cities: HashMap<&'static str, (&'static str, Option<&'static str>)>,
}

impl Atlas {
    pub fn new() -> Self {
        let mut atlas = Self::default();
        atlas.provinces.insert("makkah", "sa");
        atlas.provinces.insert("riyadh-region", "sa");
        atlas.provinces.insert("giza", "eg");
        atlas.cities.insert("jeddah", ("sa", Some("makkah")));
        atlas.cities.insert("taif", ("sa", Some("makkah")));
        atlas.cities.insert("riyadh", ("sa", Some("riyadh-region")));
        atlas.cities.insert("alula", ("sa", None));
        atlas.cities.insert("cairo", ("eg", None));
        atlas
    }
}

impl GeoLookup for Atlas {
    fn country_of(&self, province_id: &ProvinceId) -> Option<CountryId> {
        self.provinces
            .get(province_id.as_str())
            .and_then(|c| CountryId::new(*c).ok())
    }

    fn province_of(&self, city_id: &CityId) -> Option<ProvinceId> {
        self.cities
            .get(city_id.as_str())
            .and_then(|(_, p)| *p)
            .and_then(|p| ProvinceId::new(p).ok())
    }

    fn country_of_city(&self, city_id: &CityId) -> Option<CountryId> {
        self.cities
            .get(city_id.as_str())
            .and_then(|(c, _)| CountryId::new(*c).ok())
    }
}

/// In-memory record store.
#[derive(Default)]
pub struct MemoryStore {
    records: RefCell<Vec<ContentRecord>>,
    next_id: Cell<usize>,
}

impl MemoryStore {
    pub fn get(&self, id: &RecordId) -> Option<ContentRecord> {
        self.records.borrow().iter().find(|r| &r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }
}

impl ContentReader for MemoryStore {
    fn list_records(
        &self,
        query: RecordListQuery,
    ) -> RepositoryResult<(usize, Vec<ContentRecord>)> {
        let matching: Vec<ContentRecord> = self
            .records
            .borrow()
            .iter()
            .filter(|r| query.query.matches(r))
            .cloned()
            .collect();
        let total = matching.len();
        let items = match query.pagination {
            Some(p) => matching
                .into_iter()
                .skip((p.page.max(1) - 1) * p.per_page)
                .take(p.per_page)
                .collect(),
            None => matching,
        };
        Ok((total, items))
    }

    fn get_record_by_id(&self, id: &RecordId) -> RepositoryResult<Option<ContentRecord>> {
        Ok(self.get(id))
    }
}

impl ContentWriter for MemoryStore {
    fn next_record_id(&self) -> RepositoryResult<RecordId> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        Ok(RecordId::new(format!("r{id}"))?)
    }

    fn save_record(&self, record: &ContentRecord) -> RepositoryResult<usize> {
        let mut records = self.records.borrow_mut();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(1)
    }

    fn delete_record(&self, id: &RecordId) -> RepositoryResult<usize> {
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|r| &r.id != id);
        Ok(before - records.len())
    }
}
