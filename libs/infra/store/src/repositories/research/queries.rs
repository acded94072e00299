// [libs/infra/store/src/repositories/research/queries.rs]
//! SQL statements for the `company_research` table.

pub const UPSERT_RESEARCH: &str = r#"
    INSERT INTO company_research
        (id, run_id, company_id, status, facts_json, signals_json, confidence,
         units_under_management, pms_detected, meets_all_requirements, disqualifier, researched_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
    ON CONFLICT(run_id, company_id) DO UPDATE SET
        status = excluded.status,
        facts_json = excluded.facts_json,
        signals_json = excluded.signals_json,
        confidence = excluded.confidence,
        units_under_management = excluded.units_under_management,
        pms_detected = excluded.pms_detected,
        meets_all_requirements = excluded.meets_all_requirements,
        disqualifier = excluded.disqualifier,
        researched_at = excluded.researched_at
"#;

pub const GET_RESEARCH: &str = r#"
    SELECT id, run_id, company_id, status, facts_json, signals_json, confidence,
           units_under_management, pms_detected, meets_all_requirements, disqualifier, researched_at
    FROM company_research WHERE run_id = ?1 AND company_id = ?2
"#;

pub const HAS_PENDING_RESEARCH: &str = r#"
    SELECT COUNT(*) FROM company_candidates cc
    WHERE cc.run_id = ?1
      AND cc.status IN ('validated', 'promoted')
      AND NOT EXISTS (SELECT 1 FROM company_research cr WHERE cr.run_id = cc.run_id AND cr.company_id = cc.id)
"#;
