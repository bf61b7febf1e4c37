//! End-to-end tests over temporary project trees.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};
use unabstract::{DiscoveryOptions, Error, ReplacementCandidate, Result, SourceRole, Unabstracter};

fn write(root: &Path, file: &str, content: &str) -> PathBuf {
    let path = root.join(file);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for (file, content) in files {
        write(dir.path(), file, content);
    }
    dir
}

fn prepared(dir: &TempDir) -> Unabstracter {
    let options = DiscoveryOptions::new(dir.path().join("templates"), dir.path().join("styles"));
    let mut run = Unabstracter::new(&options).unwrap();
    run.prepare().unwrap();
    run
}

fn candidates(run: &Unabstracter) -> Vec<ReplacementCandidate> {
    run.candidates().collect::<Result<_>>().unwrap()
}

#[test]
fn test_card_scenario() {
    let dir = project(&[
        ("styles/app.scss", ".card { @apply \"p-4 rounded\"; }\n.card-alt { @extend .card; }\n"),
        ("templates/page.html.twig", "<section>\n  <div class=\"card\">Hi</div>\n</section>\n"),
    ]);

    let run = prepared(&dir);
    assert!(run.warnings().is_empty());
    assert_eq!(run.flatten("card"), "p-4 rounded");
    assert_eq!(run.flatten("card-alt"), "p-4 rounded");

    let found = candidates(&run);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_line_number(), 2);

    run.replace(&found[0]).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("templates/page.html.twig")).unwrap(),
        "<section>\n  <div class=\"p-4 rounded\">Hi</div>\n</section>\n"
    );
}

#[test]
fn test_custom_css_warning() {
    let dir = project(&[
        ("styles/legacy.scss", ".legacy { color: red; }\n"),
        ("templates/page.html.twig", "<p class=\"legacy\"></p>\n"),
    ]);

    let run = prepared(&dir);
    assert_eq!(run.warnings().len(), 1);

    let sheet = fs::canonicalize(dir.path().join("styles/legacy.scss")).unwrap();
    assert_eq!(
        run.warnings()[0].to_string(),
        format!("Custom CSS in {}", sheet.display())
    );
    assert!(candidates(&run).is_empty());
}

#[test]
fn test_substring_match_is_reported() {
    let dir = project(&[
        ("styles/buttons.scss", ".btn { @apply px-4 py-2; }\n"),
        ("templates/page.html.twig", "<a class=\"btn-lg\">Go</a>\n"),
    ]);

    let run = prepared(&dir);
    let found = candidates(&run);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].selector, "btn");

    run.replace(&found[0]).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("templates/page.html.twig")).unwrap(),
        "<a class=\"px-4 py-2-lg\">Go</a>\n"
    );
}

#[test]
fn test_comments_and_loops_in_stylesheets() {
    let dir = project(&[
        (
            "styles/app.scss",
            ".card { @apply p-4 /* pad */ rounded; }\n@each $c in red, blue { .text-#{$c} { color: $c; } }\n",
        ),
        ("templates/page.html.twig", "<div class=\"card\"></div>\n"),
    ]);

    let run = prepared(&dir);
    assert!(run.warnings().is_empty());

    let found = candidates(&run);
    assert_eq!(found.len(), 1);
    run.replace(&found[0]).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("templates/page.html.twig")).unwrap(),
        "<div class=\"p-4 rounded\"></div>\n"
    );
}

#[test]
fn test_matching_is_idempotent() {
    let dir = project(&[
        ("styles/app.scss", ".card { @apply p-4; }\n.btn { @apply px-2; }\n"),
        ("templates/a.html.twig", "<div class=\"card\">\n<a class=\"btn\">x</a>\n"),
        ("templates/b/c.html.twig", "<span class=\"card btn\"></span>\n"),
    ]);

    let run = prepared(&dir);
    assert_eq!(candidates(&run), candidates(&run));
    assert_eq!(candidates(&run).len(), 4);
}

#[test]
fn test_replacement_leaves_other_lines() {
    let markup = "{% block body %}\r\n<div class=\"card\">\n\t<div class=\"card\">  \n{% endblock %}";
    let dir = project(&[
        ("styles/app.scss", ".card { @apply p-4; }\n"),
        ("templates/page.html.twig", markup),
    ]);

    let run = prepared(&dir);
    let found = candidates(&run);
    assert_eq!(found.len(), 2);

    run.replace(&found[1]).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("templates/page.html.twig")).unwrap(),
        "{% block body %}\r\n<div class=\"card\">\n\t<div class=\"p-4\">  \n{% endblock %}"
    );
}

#[test]
fn test_accepting_every_candidate() {
    let dir = project(&[
        ("styles/_base.scss", ".card { @apply p-4; }\n"),
        ("styles/components.scss", ".card-alt { @extend .card; @apply shadow; }\n"),
        ("templates/page.html.twig", "<div class=\"card-alt\"></div>\n<div class=\"card\"></div>\n"),
    ]);

    let run = prepared(&dir);
    for candidate in run.candidates() {
        match run.replace(&candidate.unwrap()) {
            Ok(()) | Err(Error::SelectorNotOnLine { .. }) => {}
            Err(err) => panic!("unexpected error: {}", err),
        }
    }

    assert_eq!(
        fs::read_to_string(dir.path().join("templates/page.html.twig")).unwrap(),
        "<div class=\"p-4-alt\"></div>\n<div class=\"p-4\"></div>\n"
    );
}

#[test]
fn test_vendor_directories_are_excluded() {
    let dir = project(&[
        ("styles/app.scss", ".card { @apply p-4; }\n"),
        ("styles/node_modules/lib/lib.scss", ".lib { color: red; }\n"),
        ("templates/page.html.twig", "<div class=\"card\"></div>\n"),
        ("templates/vendor/theme.html.twig", "<div class=\"card\"></div>\n"),
    ]);

    let run = prepared(&dir);
    assert_eq!(run.stylesheet_count(), 1);
    assert_eq!(run.markup_count(), 1);
    assert!(run.warnings().is_empty());
}

#[test]
fn test_invalid_roots_fail_fast() {
    let dir = project(&[("styles/app.scss", ".card { @apply p-4; }\n")]);
    fs::create_dir_all(dir.path().join("templates")).unwrap();

    let options = DiscoveryOptions::new(dir.path().join("templates"), dir.path().join("styles"));
    match Unabstracter::new(&options) {
        Err(Error::InvalidInputPath { role, .. }) => assert_eq!(role, SourceRole::Markup),
        other => panic!("expected InvalidInputPath, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_unhandled_include_aborts_prepare() {
    let dir = project(&[
        ("styles/app.scss", ".btn {\n  @include focus-ring;\n}\n"),
        ("templates/page.html.twig", "<a class=\"btn\"></a>\n"),
    ]);

    let options = DiscoveryOptions::new(dir.path().join("templates"), dir.path().join("styles"));
    let mut run = Unabstracter::new(&options).unwrap();
    let err = run.prepare().unwrap_err();

    assert!(err.to_string().contains("unhandled rule kind 'include'"));
    assert!(run.abstractions().is_empty());
}
