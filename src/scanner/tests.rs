use super::extract_type_name;

#[test]
fn test_namespaced_class() {
    let src = "<?php\nnamespace TempTest;\n\nclass SimpleController\n{\n}\n";
    assert_eq!(
        extract_type_name(src).as_deref(),
        Some("TempTest\\SimpleController")
    );
}

#[test]
fn test_global_class() {
    assert_eq!(
        extract_type_name("<?php class UserController {}").as_deref(),
        Some("UserController")
    );
}

#[test]
fn test_no_declaration() {
    assert_eq!(extract_type_name("<?php\nnamespace App;\nfunction helper() {}\n"), None);
    assert_eq!(extract_type_name(""), None);
}

#[test]
fn test_anonymous_class_is_skipped() {
    let src = r#"<?php
namespace App;

$handler = new class(42) {
    public function __invoke() {}
};

abstract class BaseController {}
"#;
    assert_eq!(extract_type_name(src).as_deref(), Some("App\\BaseController"));
}

#[test]
fn test_only_anonymous_class_yields_none() {
    let src = "<?php\nreturn new class {\n};\n";
    assert_eq!(extract_type_name(src), None);
}

#[test]
fn test_class_constant_fetch_is_skipped() {
    let src = r#"<?php
namespace App\Http;

use App\Http\AuthMiddleware;

#[Middleware([AuthMiddleware::class])]
final class UserController {}
"#;
    assert_eq!(
        extract_type_name(src).as_deref(),
        Some("App\\Http\\UserController")
    );
}

#[test]
fn test_comments_between_tokens() {
    let src = "<?php namespace /* ns */ App\\Admin // trailing\n; class # why\n /* name */ AdminController {}";
    assert_eq!(
        extract_type_name(src).as_deref(),
        Some("App\\Admin\\AdminController")
    );
}

#[test]
fn test_keyword_in_comment_or_string_is_ignored() {
    let src = r#"<?php
namespace App;
// class CommentedController
$s = "class StringController";
class RealController {}
"#;
    assert_eq!(extract_type_name(src).as_deref(), Some("App\\RealController"));
}

#[test]
fn test_innermost_preceding_namespace_wins() {
    let src = r#"<?php
namespace First { function f() {} }
namespace Second\Inner { class ThingController {} }
"#;
    assert_eq!(
        extract_type_name(src).as_deref(),
        Some("Second\\Inner\\ThingController")
    );
}

#[test]
fn test_first_named_declaration_wins() {
    let src = "<?php namespace App; class AController {} class BController {}";
    assert_eq!(extract_type_name(src).as_deref(), Some("App\\AController"));
}

#[test]
fn test_interface_declaration_is_reported() {
    let src = "<?php namespace App; interface ResourceController {}";
    assert_eq!(
        extract_type_name(src).as_deref(),
        Some("App\\ResourceController")
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    let src = "<?php NAMESPACE App; Final CLASS LoudController {}";
    assert_eq!(extract_type_name(src).as_deref(), Some("App\\LoudController"));
}

#[test]
fn test_variable_named_class_is_not_a_keyword() {
    let src = "<?php namespace App; $class = 'x'; class QuietController {}";
    assert_eq!(extract_type_name(src).as_deref(), Some("App\\QuietController"));
}

#[test]
fn test_global_namespace_block_resets_namespace() {
    let src = "<?php namespace App { } namespace { class RootController {} }";
    assert_eq!(extract_type_name(src).as_deref(), Some("RootController"));
}

#[test]
fn test_anonymous_class_with_modifier_is_skipped() {
    let src = "<?php\nnamespace App;\n$x = new readonly class extends Base {};\nfinal class UserController {}\n";
    assert_eq!(extract_type_name(src).as_deref(), Some("App\\UserController"));
}

#[test]
fn test_anonymous_class_with_attribute_is_skipped() {
    let src = r#"<?php
namespace App;
$x = new #[Attr(['a' => [1, 2]])] #[Other] readonly class implements Countable {};
final class UserController {}
"#;
    assert_eq!(extract_type_name(src).as_deref(), Some("App\\UserController"));
}

#[test]
fn test_attribute_before_declaration_is_not_anonymous() {
    let src = "<?php\nnamespace App;\n$list = [1, 2];\n#[Middleware([Auth::class])]\nreadonly class UserController {}\n";
    assert_eq!(extract_type_name(src).as_deref(), Some("App\\UserController"));
}

#[test]
fn test_clause_keyword_is_never_a_type_name() {
    let src = "<?php\n$x = (class extends Base {});\nclass HomeController {}\n";
    assert_eq!(extract_type_name(src).as_deref(), Some("HomeController"));
}
