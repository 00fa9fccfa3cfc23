//! Setup-then-audit flow tests

use super::helpers::project_with_fake_tools;
use phasekit::commands::{audit, setup};
use phasekit::models::ArtifactKind;

#[test]
fn audit_counts_what_generation_produced() {
    let entry = "\
        cd \"$(dirname \"$0\")/outputs\"\n\
        printf '{}' > validation_data/run_a.json\n\
        printf '{}' > validation_data/run_b.json\n\
        printf '{}' > validation_data/run_c.json\n\
        printf x > graphs/curve_a.png\n\
        printf x > graphs/curve_b.png\n\
        exit 0";
    let project = project_with_fake_tools(&[], &[], &[], entry);

    setup::run(project.root(), None, false).unwrap();

    let report = audit::build_report(&project.phase_dir()).unwrap();

    assert!(report.outputs_present);
    assert_eq!(report.counts[&ArtifactKind::Json], 3);
    assert_eq!(report.counts[&ArtifactKind::Png], 2);
    assert_eq!(report.counts[&ArtifactKind::Csv], 0);
    assert_eq!(report.counts[&ArtifactKind::Qasm], 0);
    assert_eq!(report.recent.len(), 5);
}

#[test]
fn audit_of_fresh_tree_is_all_zeros() {
    let project = project_with_fake_tools(&[], &[], &[], "exit 0");

    setup::run(project.root(), None, true).unwrap();

    let report = audit::build_report(&project.phase_dir()).unwrap();

    assert!(report.outputs_present);
    assert_eq!(report.total_files(), 0);
    assert!(report.recent.is_empty());
}

#[test]
fn audit_before_setup_reports_missing_outputs() {
    let project = project_with_fake_tools(&[], &[], &[], "exit 0");

    let report = audit::build_report(&project.phase_dir()).unwrap();
    assert!(!report.outputs_present);
    assert_eq!(report.total_files(), 0);

    // Non-strict audit of a missing root completes successfully
    audit::run(project.root(), None, false, false).unwrap();

    // Strict mode turns the same condition into an error
    assert!(audit::run(project.root(), None, false, true).is_err());
}
