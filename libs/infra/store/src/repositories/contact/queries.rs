// [libs/infra/store/src/repositories/contact/queries.rs]
//! SQL statements for the `contact_candidates` table.

pub const INSERT_CANDIDATE: &str = r#"
    INSERT OR IGNORE INTO contact_candidates
        (id, run_id, company_id, full_name, title, email, linkedin_url, department,
         seniority, quality_score, signals_json, evidence_json, status, idempotency_key,
         worker_id, lease_until, discovered_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, NULL, NULL, ?15)
"#;

pub const COUNT_READY_FOR_COMPANY: &str = r#"
    SELECT COUNT(*) FROM contact_candidates
    WHERE run_id = ?1 AND company_id = ?2 AND status IN ('validated', 'promoted')
"#;

pub const LIST_FOR_COMPANY: &str = r#"
    SELECT id, run_id, company_id, full_name, title, email, linkedin_url, department,
           seniority, quality_score, signals_json, evidence_json, status, idempotency_key,
           worker_id, lease_until, discovered_at
    FROM contact_candidates WHERE run_id = ?1 AND company_id = ?2
"#;

pub const LIST_READY_FOR_RUN: &str = r#"
    SELECT id, run_id, company_id, full_name, title, email, linkedin_url, department,
           seniority, quality_score, signals_json, evidence_json, status, idempotency_key,
           worker_id, lease_until, discovered_at
    FROM contact_candidates WHERE run_id = ?1 AND status IN ('validated', 'promoted')
"#;

pub const CONTACTS_MIN_GAP_PER_COMPANY: &str = r#"
    SELECT cc.id,
           COALESCE((
               SELECT COUNT(*) FROM contact_candidates ct
               WHERE ct.run_id = cc.run_id AND ct.company_id = cc.id AND ct.status IN ('validated', 'promoted')
           ), 0) AS contacts_ready
    FROM company_candidates cc
    WHERE cc.run_id = ?1 AND cc.status IN ('validated', 'promoted')
"#;
