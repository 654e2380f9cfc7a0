//! CLI command for `idfmgr doctor`
//!
//! Checks the host tools ESP-IDF needs, the install root, and the project
//! in the current directory.

use anyhow::{bail, Result};
use std::path::Path;

use crate::cli::output::{
    is_json, is_quiet, print_detail, print_info, print_line, print_success, print_warning, status,
};
use crate::core::context::Context;
use crate::core::doctor::{run_doctor, DoctorReport};

const FAILURE: &str = "Missing required dependencies. Run 'idfmgr doctor' for details.";

/// Execute the doctor command
pub async fn execute(ctx: &Context, project_dir: Option<&Path>) -> Result<()> {
    let report = run_doctor(ctx, project_dir);

    if is_json() {
        return print_json(&report);
    }

    if is_quiet() {
        let failed_required = report.failed_required();
        for check in &failed_required {
            eprintln!("{} Missing required: {}", status::ERROR, check.name);
        }
        if !failed_required.is_empty() {
            bail!(FAILURE);
        }
        return Ok(());
    }

    print_info("Checking system dependencies...");
    print_line("");

    for check in &report.checks {
        let required_str = if check.required { "" } else { " [optional]" };
        if check.passed {
            let version_str = check
                .version
                .as_ref()
                .map(|v| format!(" ({v})"))
                .unwrap_or_default();
            print_line(&format!(
                "  {} {}{version_str}{required_str}",
                status::SUCCESS,
                check.name
            ));
        } else {
            print_line(&format!("  {} {}{required_str}", status::ERROR, check.name));
            if let Some(error) = &check.error {
                print_detail(&format!("  Error: {error}"));
            }
            if let Some(suggestion) = &check.suggestion {
                print_detail(&format!("  Suggestion: {suggestion}"));
            }
        }
    }

    if !report.project_issues.is_empty() {
        print_line("");
        print_warning("Project issues:");
        for issue in &report.project_issues {
            print_detail(&format!("• {issue}"));
        }
    }

    print_line("");
    let passed = report.passed_count();
    let total = report.checks.len();
    let failed_required = report.failed_required();

    if report.all_passed() {
        print_success(&format!("All checks passed ({passed}/{total})"));
        print_detail("System is ready for ESP-IDF development!");
    } else if failed_required.is_empty() {
        print_warning(&format!("{passed}/{total} checks passed"));
    } else {
        print_line(&format!("{} {passed}/{total} checks passed", status::ERROR));
        print_detail("Please install missing required dependencies:");
        for check in &failed_required {
            if let Some(suggestion) = &check.suggestion {
                print_detail(&format!("• {}: {suggestion}", check.name));
            }
        }
        bail!(FAILURE);
    }

    Ok(())
}

fn print_json(report: &DoctorReport) -> Result<()> {
    let failed_required = report.failed_required();
    let status = if report.all_passed() {
        "success"
    } else if failed_required.is_empty() {
        "warning"
    } else {
        "error"
    };
    let json_result = serde_json::json!({
        "status": status,
        "checks": report.checks.iter().map(|c| serde_json::json!({
            "name": c.name,
            "passed": c.passed,
            "required": c.required,
            "version": c.version,
            "error": c.error,
            "suggestion": c.suggestion,
        })).collect::<Vec<_>>(),
        "project_issues": report.project_issues,
        "passed_count": report.passed_count(),
        "total_count": report.checks.len(),
    });
    println!("{}", serde_json::to_string_pretty(&json_result)?);

    if !failed_required.is_empty() {
        bail!(FAILURE);
    }
    Ok(())
}
