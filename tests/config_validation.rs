// tests/config_validation.rs

use std::io::Write;

use clap::Parser;
use tempfile::NamedTempFile;

use drupalci::cli::CliArgs;
use drupalci::errors::DrupalCiError;
use drupalci::prepare_step;
use drupalci::steps::Step;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn parse(file: &NamedTempFile, rest: &[&str]) -> CliArgs {
    let path = file.path().to_str().unwrap();
    let mut argv = vec!["drupalci", "--config", path];
    argv.extend_from_slice(rest);
    CliArgs::try_parse_from(argv).unwrap()
}

fn invalid_fields(err: anyhow::Error) -> Vec<&'static str> {
    match err.downcast_ref::<DrupalCiError>() {
        Some(DrupalCiError::InvalidConfig(errors)) => errors.fields(),
        _ => panic!("expected InvalidConfig, got {err:?}"),
    }
}

#[test]
fn provision_without_database_is_blocked() {
    let file = config_file("");
    let err = prepare_step(&parse(&file, &["provision", "--coder"])).unwrap_err();

    assert_eq!(invalid_fields(err), vec!["provision.db"]);
}

#[test]
fn database_from_file_is_enough() {
    let file = config_file(
        r#"
[provision]
db = "mysql://u:p@host/db"
simpletest = true
"#,
    );
    let step = prepare_step(&parse(&file, &["provision"])).unwrap();

    match step {
        Step::Provision(p) => {
            assert_eq!(p.settings().db, "mysql://u:p@host/db");
            assert!(p.settings().simpletest);
            assert!(!p.settings().coder);
        }
        other => panic!("expected provision step, got {other:?}"),
    }
}

#[test]
fn cli_database_overrides_file() {
    let file = config_file("[provision]\ndb = \"mysql://old@host/db\"\n");
    let step = prepare_step(&parse(&file, &["provision", "--db", "pgsql://new@host/db"])).unwrap();

    match step {
        Step::Provision(p) => assert_eq!(p.settings().db, "pgsql://new@host/db"),
        other => panic!("expected provision step, got {other:?}"),
    }
}

#[test]
fn upstream_source_is_configurable() {
    let file = config_file(
        r#"
[source]
url = "https://git.drupalcode.org/project/drupal.git"
tag = "7.98"
shallow = true

[provision]
db = "sqlite://sites/default/files/.ht.sqlite"
"#,
    );
    let step = prepare_step(&parse(&file, &["provision"])).unwrap();

    match step {
        Step::Provision(p) => {
            assert_eq!(p.source().url, "https://git.drupalcode.org/project/drupal.git");
            assert_eq!(p.source().tag, "7.98");
            assert_eq!(p.source().branch, "7.x");
            assert!(p.source().shallow);
        }
        other => panic!("expected provision step, got {other:?}"),
    }
}

#[test]
fn every_review_problem_is_reported_at_once() {
    let file = config_file("[tools]\ndrush = \"\"\n");
    let err = prepare_step(&parse(&file, &["review", "--logs", "/tmp/out"])).unwrap_err();

    // shared sections are checked first and stop there
    assert_eq!(invalid_fields(err), vec!["tools.drush"]);

    let file = config_file("");
    let err = prepare_step(&parse(
        &file,
        &["review", "--root", "../outside", "--logs", "/tmp/out", "--except", "[bad"],
    ))
    .unwrap_err();
    assert_eq!(
        invalid_fields(err),
        vec!["review.root", "review.logs", "review.except"]
    );
}

#[test]
fn make_requires_a_makefile() {
    let file = config_file("");
    let err = prepare_step(&parse(&file, &["make"])).unwrap_err();
    assert_eq!(invalid_fields(err), vec!["make.makefile"]);

    let step = prepare_step(&parse(&file, &["make", "--makefile", "site.make"])).unwrap();
    assert_eq!(step.name(), "make");
}

#[test]
fn unknown_category_value_type_is_a_toml_error() {
    let file = config_file("[review]\nstyle = \"yes\"\n");
    let err = prepare_step(&parse(&file, &["review"])).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DrupalCiError>(),
        Some(DrupalCiError::TomlError(_))
    ));
}
