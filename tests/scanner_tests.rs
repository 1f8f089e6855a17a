mod common;

use attroute::scanner::{extract_type_name, extract_type_name_from_file};
use common::fixtures::ControllerDir;

#[test]
fn test_realistic_controller_file() {
    let dir = ControllerDir::new();
    let path = dir.file(
        "Http/Controllers/OrderController.php",
        r#"<?php

declare(strict_types=1);

/**
 * Handles orders.
 *
 * class NotThisOne
 */
namespace App\Http\Controllers;

use App\Http\Middleware\AuthMiddleware;
use League\Route\Http\Exception\NotFoundException;

#[Middleware([AuthMiddleware::class])]
final class OrderController extends BaseController implements HasRoutes
{
    private const TEMPLATE = <<<EOT
    class Fake {}
    EOT;

    #[Route(methods: ['GET'], path: '/orders/{id:\d+}', name: 'orders.show')]
    public function show(int $id): array
    {
        return ['class' => self::class];
    }
}
"#,
    );

    assert_eq!(
        extract_type_name_from_file(&path).as_deref(),
        Some("App\\Http\\Controllers\\OrderController")
    );
}

#[test]
fn test_interface_declaration() {
    let dir = ControllerDir::new();
    let path = dir.interface("ContractController.php", "App\\ContractController");
    assert_eq!(
        extract_type_name_from_file(&path).as_deref(),
        Some("App\\ContractController")
    );
}

#[test]
fn test_unreadable_file_yields_none() {
    let dir = ControllerDir::new();
    let path = dir.path().join("BrokenController.php");
    std::fs::write(&path, [0xff, 0xfe, b'c', b'l', b'a', b's', b's']).unwrap();
    assert_eq!(extract_type_name_from_file(&path), None);

    assert_eq!(extract_type_name_from_file(&dir.path().join("missing.php")), None);
}

#[test]
fn test_first_declaration_wins() {
    let src = "<?php\nnamespace App;\nclass FirstController {}\nclass SecondController {}\n";
    assert_eq!(extract_type_name(src).as_deref(), Some("App\\FirstController"));
}

#[test]
fn test_string_containing_class_keyword_is_ignored() {
    let src = "<?php\n$sql = \"select class from t\";\n$x = 'class Fake';\nclass RealController {}\n";
    assert_eq!(extract_type_name(src).as_deref(), Some("RealController"));
}
