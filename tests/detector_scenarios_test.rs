use indoc::indoc;
use migmap::core::codec;
use migmap::core::{FileKind, Finding, SmellKind};
use migmap::{analyze_script, parse_source};
use serde_json::Value;
use std::path::Path;

fn analyze(source: &str) -> Vec<Finding> {
    let tree = parse_source(FileKind::Script, source).unwrap();
    analyze_script(Path::new("ctrl.js"), &tree)
}

fn metrics_for(findings: &[Finding], smell: SmellKind) -> Value {
    let finding = findings
        .iter()
        .find(|f| f.smell == smell)
        .unwrap_or_else(|| panic!("no {smell} finding"));
    let (payload, _) = codec::decode(&finding.message);
    payload.expect("finding should carry a metrics payload")
}

#[test]
fn scope_sprawl_grades_mixed_assignments() {
    let source = indoc! {r#"
        angular.module('app').controller('MainCtrl', function($scope) {
            $scope.user = {};
            $scope.items = [];
            $scope.total = 0;
            $scope.query = '';
            $scope.page = 1;
            $scope.mode = 'list';
            $scope.save = function() {};
            $scope.reset = function() {};
        });
    "#};

    let findings = analyze(source);
    let metrics = metrics_for(&findings, SmellKind::ScopePropertySprawl);
    assert_eq!(metrics["severity"], "HIGH");
    assert_eq!(metrics["totalOccurrences"], 8);
    assert_eq!(metrics["dataAssignments"], 6);
    assert_eq!(metrics["functionAssignments"], 2);
    assert_eq!(metrics["samples"][0], "user");
}

#[test]
fn single_root_scope_read_is_medium() {
    let source = indoc! {r#"
        function AuditCtrl($scope) {
            $scope.bus = $rootScope;
        }
    "#};

    let findings = analyze(source);
    let metrics = metrics_for(&findings, SmellKind::GlobalScopeLeak);
    assert_eq!(metrics["severity"], "MEDIUM");
    assert_eq!(metrics["totalOccurrences"], 1);
    assert_eq!(metrics["reads"], 1);
    assert_eq!(metrics["assignments"], 0);
    assert_eq!(metrics["functionCalls"], 0);
}

#[test]
fn injected_handle_tokens_count_by_name() {
    // Name-only matching: the injection parameter itself is a reference.
    let source = indoc! {r#"
        function HeaderCtrl($scope, $rootScope) {
            $rootScope.title = 'Dashboard';
        }
    "#};

    let findings = analyze(source);
    let metrics = metrics_for(&findings, SmellKind::GlobalScopeLeak);
    assert_eq!(metrics["totalOccurrences"], 2);
    assert_eq!(metrics["assignments"], 1);
    assert_eq!(metrics["reads"], 1);
}

#[test]
fn network_call_escalates_legacy_library_usage() {
    let source = indoc! {r#"
        function LegacyCtrl($scope) {
            $scope.load = function() {
                $.ajax({ url: '/api/items' });
                $('#list').html('');
                $('.banner').css('display', 'none');
            };
        }
    "#};

    let findings = analyze(source);
    let metrics = metrics_for(&findings, SmellKind::LegacyDomLibraryUsage);
    assert_eq!(metrics["severity"], "CRITICAL");
    assert_eq!(metrics["totalOccurrences"], 3);
    assert_eq!(metrics["domCount"], 2);
    assert_eq!(metrics["ajaxCount"], 1);
}

#[test]
fn native_dom_access_escalates_to_critical() {
    let source = indoc! {r#"
        function ChartCtrl($scope) {
            $scope.render = function() {
                document.getElementById('chart');
            };
        }
    "#};

    let findings = analyze(source);
    let metrics = metrics_for(&findings, SmellKind::DirectDomAccess);
    assert_eq!(metrics["severity"], "CRITICAL");
    assert_eq!(metrics["nativeCount"], 1);
    assert_eq!(metrics["wrapperCount"], 0);
    assert_eq!(metrics["samples"][0], "document.getElementById");
}

#[test]
fn clean_controller_yields_no_findings() {
    let source = indoc! {r#"
        function CleanCtrl() {
            var state = { count: 0 };
            function increment() {
                state.count += 1;
            }
            increment();
        }
    "#};

    assert!(analyze(source).is_empty());
}

#[test]
fn one_file_yields_one_finding_per_smell() {
    let source = indoc! {r#"
        function DashboardCtrl($scope) {
            $scope.rows = [];
            $scope.filter = '';
            $scope.page = 0;
            document.getElementById('chart');
        }
    "#};

    let findings = analyze(source);
    let mut kinds: Vec<SmellKind> = findings.iter().map(|f| f.smell).collect();
    kinds.sort_by_key(|k| k.rule_id());
    assert_eq!(
        kinds,
        vec![SmellKind::DirectDomAccess, SmellKind::ScopePropertySprawl]
    );

    let sprawl = findings
        .iter()
        .find(|f| f.smell == SmellKind::ScopePropertySprawl)
        .unwrap();
    assert_eq!(sprawl.position.line, 2);
}

#[test]
fn method_assignments_trip_the_method_detector_too() {
    let source = indoc! {r#"
        function FormCtrl($scope) {
            $scope.submit = function() {};
            $scope.cancel = function() {};
            $scope.validate = function() {};
        }
    "#};

    let findings = analyze(source);
    let metrics = metrics_for(&findings, SmellKind::ControllerMethodSprawl);
    assert_eq!(metrics["severity"], "CRITICAL");
    assert_eq!(metrics["totalOccurrences"], 3);
    assert_eq!(metrics["samples"][0], "submit");

    // The same assignments grade as sprawl only once past its own threshold.
    let sprawl = metrics_for(&findings, SmellKind::ScopePropertySprawl);
    assert_eq!(sprawl["functionAssignments"], 3);
}

#[test]
fn comments_never_count() {
    let source = indoc! {r#"
        function QuietCtrl($scope) {
            // $rootScope.user = legacy;
            // $('#old').html('');
            $scope.label = 'ok';
        }
    "#};

    assert!(analyze(source).is_empty());
}
