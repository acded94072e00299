// [libs/infra/store/src/repositories/suppression/queries.rs]
//! SQL statements for the `suppressed_domains` table.

pub const RECORD_SUPPRESSION: &str = r#"
    INSERT INTO suppressed_domains (domain, source, recorded_at, expires_at)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(domain, source) DO UPDATE SET recorded_at = excluded.recorded_at, expires_at = excluded.expires_at
"#;

pub const LIST_ACTIVE_DOMAINS: &str = r#"
    SELECT domain, source, recorded_at, expires_at
    FROM suppressed_domains
    WHERE expires_at IS NULL OR expires_at > ?1
"#;
