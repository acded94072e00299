// [libs/infra/store/src/repositories/company/queries.rs]
//! SQL statements for the `company_candidates` table.

pub const INSERT_CANDIDATE: &str = r#"
    INSERT OR IGNORE INTO company_candidates
        (id, run_id, name, website, domain, state, description, discovery_source,
         pms_detected, units_estimate, evidence_json, status, meets_all_requirements,
         rejected_reasons, idempotency_key, worker_id, lease_until, discovered_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, NULL, NULL, ?16)
"#;

pub const COUNT_READY: &str = r#"
    SELECT COUNT(*) FROM company_candidates
    WHERE run_id = ?1 AND status IN ('validated', 'promoted')
"#;

pub const GET_CANDIDATE: &str = r#"
    SELECT id, run_id, name, website, domain, state, description, discovery_source,
           pms_detected, units_estimate, evidence_json, status, meets_all_requirements,
           rejected_reasons, idempotency_key, worker_id, lease_until, discovered_at
    FROM company_candidates WHERE id = ?1
"#;

pub const LIST_READY: &str = r#"
    SELECT id, run_id, name, website, domain, state, description, discovery_source,
           pms_detected, units_estimate, evidence_json, status, meets_all_requirements,
           rejected_reasons, idempotency_key, worker_id, lease_until, discovered_at
    FROM company_candidates
    WHERE run_id = ?1 AND status IN ('validated', 'promoted')
"#;

pub const FIND_CLAIMABLE_FOR_RESEARCH: &str = r#"
    SELECT cc.id, cc.run_id, cc.name, cc.website, cc.domain, cc.state, cc.description, cc.discovery_source,
           cc.pms_detected, cc.units_estimate, cc.evidence_json, cc.status, cc.meets_all_requirements,
           cc.rejected_reasons, cc.idempotency_key, cc.worker_id, cc.lease_until, cc.discovered_at
    FROM company_candidates cc
    WHERE cc.run_id = ?1
      AND cc.status IN ('validated', 'promoted')
      AND (cc.lease_until IS NULL OR cc.lease_until < ?2)
      AND NOT EXISTS (
          SELECT 1 FROM company_research cr WHERE cr.run_id = cc.run_id AND cr.company_id = cc.id
      )
    LIMIT 1
"#;

pub const FIND_CLAIMABLE_FOR_CONTACTS: &str = r#"
    SELECT cc.id, cc.run_id, cc.name, cc.website, cc.domain, cc.state, cc.description, cc.discovery_source,
           cc.pms_detected, cc.units_estimate, cc.evidence_json, cc.status, cc.meets_all_requirements,
           cc.rejected_reasons, cc.idempotency_key, cc.worker_id, cc.lease_until, cc.discovered_at,
           (r.contacts_min - COALESCE((
               SELECT COUNT(*) FROM contact_candidates ct
               WHERE ct.run_id = cc.run_id AND ct.company_id = cc.id AND ct.status IN ('validated', 'promoted')
           ), 0)) AS contacts_min_gap
    FROM company_candidates cc
    JOIN runs r ON r.id = cc.run_id
    WHERE cc.run_id = ?1
      AND cc.status IN ('validated', 'promoted')
      AND (cc.lease_until IS NULL OR cc.lease_until < ?2)
      AND (r.contacts_min - COALESCE((
               SELECT COUNT(*) FROM contact_candidates ct
               WHERE ct.run_id = cc.run_id AND ct.company_id = cc.id AND ct.status IN ('validated', 'promoted')
           ), 0)) > 0
    LIMIT 1
"#;

pub const CLAIM_COMPANY: &str = r#"
    UPDATE company_candidates SET worker_id = ?1, lease_until = ?2
    WHERE id = ?3 AND (lease_until IS NULL OR lease_until < ?4)
"#;

pub const RELEASE_LEASE: &str = r#"
    UPDATE company_candidates SET worker_id = NULL, lease_until = NULL WHERE id = ?1
"#;

pub const REJECT_CANDIDATE: &str = r#"
    UPDATE company_candidates SET status = 'rejected', rejected_reasons = ?1 WHERE id = ?2
"#;
