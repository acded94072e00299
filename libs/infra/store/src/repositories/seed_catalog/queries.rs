// [libs/infra/store/src/repositories/seed_catalog/queries.rs]
//! SQL statements for the read-only `seed_catalog` table.

pub const MATCH_ALL_FILTERS: &str = r#"
    SELECT id, pms, state, city, name, website, domain, units_estimate
    FROM seed_catalog WHERE pms = ?1 AND state = ?2 AND city = ?3
"#;

pub const MATCH_PMS_AND_STATE: &str = r#"
    SELECT id, pms, state, city, name, website, domain, units_estimate
    FROM seed_catalog WHERE pms = ?1 AND state = ?2
"#;

pub const MATCH_PMS_ONLY: &str = r#"
    SELECT id, pms, state, city, name, website, domain, units_estimate
    FROM seed_catalog WHERE pms = ?1
"#;
