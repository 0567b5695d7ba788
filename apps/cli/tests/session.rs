//! End-to-end session tests: scripted operator input over an in-memory
//! store, with the full menu output captured for assertions.

use std::io::Cursor;
use std::path::Path;

use chrono::{TimeZone, Utc};

use shelfstock_cli::Session;
use shelfstock_core::NewProduct;
use shelfstock_db::{Database, DbConfig};

async fn memory_store() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

/// Runs one full session over `script` and returns everything it printed.
async fn run_script(db: &Database, script: &str, backup: &Path) -> String {
    let input = Cursor::new(script.to_string());
    let mut output = Vec::new();
    let mut session = Session::new(db.clone(), input, &mut output, backup);
    session.run().await.unwrap();
    String::from_utf8(output).unwrap()
}

fn new_product(
    name: &str,
    quantity: i64,
    price: i64,
    day: u32,
    brand_id: Option<i64>,
) -> NewProduct {
    NewProduct {
        product_name: name.to_string(),
        product_quantity: quantity,
        product_price: price,
        date_updated: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        brand_id,
    }
}

const UNUSED_BACKUP: &str = "unused-backup.csv";

// =============================================================================
// Main Menu
// =============================================================================

#[tokio::test]
async fn test_quit_prints_goodbye() {
    let db = memory_store().await;
    let out = run_script(&db, "q\n", Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains(&format!("{:^50}", "Store Inventory Management App")));
    assert!(out.contains(&format!("{:^50}", "MAIN MENU")));
    assert!(out.contains(&"=".repeat(50)));
    assert!(out.contains("N) New Product"));
    assert!(out.contains("V) View a Product by ID"));
    assert!(out.contains("A) View Product Analysis"));
    assert!(out.contains("B) Backup the Database"));
    assert!(out.contains("L) List All Products"));
    assert!(out.contains("R) List All Brands"));
    assert!(out.contains("Q) Quit the Application"));
    assert!(out.contains("What would you like to do? "));
    assert!(out.contains("Closing App. Goodbye!"));
}

#[tokio::test]
async fn test_invalid_choice_reprompts() {
    let db = memory_store().await;
    let out = run_script(&db, "z\nq\n", Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains("Please choose one of the options above."));
    assert_eq!(out.matches("MAIN MENU").count(), 2);
}

#[tokio::test]
async fn test_end_of_input_at_main_menu_quits() {
    let db = memory_store().await;
    let out = run_script(&db, "", Path::new(UNUSED_BACKUP)).await;

    assert_eq!(out.matches("MAIN MENU").count(), 1);
    assert!(!out.contains("Closing App. Goodbye!"));
}

// =============================================================================
// Add Product
// =============================================================================

#[tokio::test]
async fn test_add_product_inserts_row() {
    let db = memory_store().await;
    db.brands().insert("Apple").await.unwrap();

    let script = "n\nMacBook Air\n5\n999.99\n1\ny\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains(&format!("{:^50}", "ADD NEW PRODUCT")));
    assert!(out.contains("Name: "));
    assert!(out.contains("Quantity: "));
    assert!(out.contains("Price (Ex: 12.99): "));
    assert!(out.contains("Brand options list:"));
    assert!(out.contains("1) Apple"));
    assert!(out.contains("Enter a brand's ID (1-1) or 'X' if the brand is not listed: "));
    assert!(out.contains("Product Name: MacBook Air"));
    assert!(out.contains("Price: $999.99"));
    assert!(out.contains("Brand: Apple"));
    assert!(out.contains("Is this correct? (y/N): "));
    assert!(out.contains("MacBook Air has been added to the database."));

    let products = db.products().list().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].product_name, "MacBook Air");
    assert_eq!(products[0].product_quantity, 5);
    assert_eq!(products[0].product_price, 99999);
    assert_eq!(products[0].brand_id, Some(1));
}

#[tokio::test]
async fn test_add_declined_is_not_saved() {
    let db = memory_store().await;

    let script = "n\nThing\n2\n5.00\nn\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    // No brands in the store, so the brand step resolves itself.
    assert!(out.contains("No brands are listed yet. Continuing without a brand."));
    assert!(out.contains("Product not added."));
    assert_eq!(db.products().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_invalid_inputs_reprompt() {
    let db = memory_store().await;

    let script = "n\n\nWidget\nabc\n3\ngratis\n4.50\nn\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains("product name is required"));
    assert!(out.contains("quantity has invalid format: must be a whole number"));
    assert!(out.contains("price has invalid format: must be a decimal number such as 5.99"));
    assert!(out.contains("Product not added."));
    assert_eq!(db.products().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_duplicate_name_updates_newest_row() {
    let db = memory_store().await;
    db.products()
        .insert(&new_product("Widget", 10, 100, 1, None))
        .await
        .unwrap();
    db.products()
        .insert(&new_product("Widget", 20, 200, 9, None))
        .await
        .unwrap();

    let script = "n\nWidget\n4\n9.99\ny\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains("NOTE: 2 duplicate product(s) found with the same name: Widget"));
    assert!(out.contains("The most recently edited version will be updated (product ID 2)"));
    assert!(out.contains("Product ID 2 has been updated in the database."));

    // Row 2 was edited most recently, so it took the update.
    let updated = db.products().get_by_id(2).await.unwrap();
    assert_eq!(updated.product_quantity, 4);
    assert_eq!(updated.product_price, 999);
    assert!(updated.date_updated > Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap());

    let untouched = db.products().get_by_id(1).await.unwrap();
    assert_eq!(untouched.product_quantity, 10);
    assert_eq!(untouched.product_price, 100);
    assert_eq!(db.products().count().await.unwrap(), 2);
}

// =============================================================================
// View / Edit / Delete
// =============================================================================

#[tokio::test]
async fn test_view_shows_product_detail() {
    let db = memory_store().await;
    db.brands().insert("Apple").await.unwrap();
    db.products()
        .insert(&new_product("Gadget", 3, 1999, 5, Some(1)))
        .await
        .unwrap();

    let script = "v\n1\nq\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains(&format!("{:^50}", "VIEW PRODUCT BY ID")));
    assert!(out.contains("Enter a product's ID number (1-1): "));
    assert!(out.contains(&"*".repeat(50)));
    assert!(out.contains("*** Gadget ***"));
    assert!(out.contains("Price: $19.99"));
    assert!(out.contains("Quantity: 3"));
    assert!(out.contains("Brand: Apple"));
    assert!(out.contains("Date Updated: January 05, 2024"));
    assert!(out.contains("e - edit product"));
    assert!(out.contains("d - delete product"));
    assert!(out.contains("q - return to main menu"));
}

#[tokio::test]
async fn test_view_rejects_unknown_and_malformed_ids() {
    let db = memory_store().await;
    db.products()
        .insert(&new_product("Gadget", 3, 1999, 5, None))
        .await
        .unwrap();

    let script = "v\nabc\n7\n1\nq\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains("ID has invalid format: must be a number"));
    assert!(out.contains("ID 7 does not exist"));
    assert!(out.contains("*** Gadget ***"));
}

#[tokio::test]
async fn test_view_empty_store_shows_notice() {
    let db = memory_store().await;
    let out = run_script(&db, "v\nq\n", Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains("There are no products in the database."));
    assert!(!out.contains("Enter a product's ID number"));
}

#[tokio::test]
async fn test_edit_product_saves_changes() {
    let db = memory_store().await;
    db.brands().insert("Apple").await.unwrap();
    db.brands().insert("Banana").await.unwrap();
    db.products()
        .insert(&new_product("Gadget", 3, 1999, 5, Some(1)))
        .await
        .unwrap();

    let script = "v\n1\ne\n7\n24.50\n2\ny\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains("Editing Gadget"));
    assert!(out.contains("Current quantity is 3."));
    assert!(out.contains("Please enter the new quantity: "));
    assert!(out.contains("Current price is $19.99."));
    assert!(out.contains("Please enter the new price (Ex: 12.99): "));
    assert!(out.contains("Current brand ID is 1: Apple."));
    assert!(out.contains("Gadget has been updated in the database."));

    let updated = db.products().get_by_id(1).await.unwrap();
    assert_eq!(updated.product_quantity, 7);
    assert_eq!(updated.product_price, 2450);
    assert_eq!(updated.brand_id, Some(2));
    assert!(updated.date_updated > Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
}

#[tokio::test]
async fn test_edit_declined_keeps_row() {
    let db = memory_store().await;
    db.brands().insert("Apple").await.unwrap();
    db.products()
        .insert(&new_product("Gadget", 3, 1999, 5, Some(1)))
        .await
        .unwrap();

    let script = "v\n1\ne\n7\n24.50\nx\nn\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains("Product not updated."));

    let unchanged = db.products().get_by_id(1).await.unwrap();
    assert_eq!(unchanged.product_quantity, 3);
    assert_eq!(unchanged.product_price, 1999);
    assert_eq!(unchanged.brand_id, Some(1));
}

#[tokio::test]
async fn test_delete_product_removes_row() {
    let db = memory_store().await;
    db.products()
        .insert(&new_product("Gadget", 3, 1999, 5, None))
        .await
        .unwrap();

    let script = "v\n1\nd\ny\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains("Are you sure you want to delete Gadget? (y/N): "));
    assert!(out.contains("Gadget has been deleted."));
    assert_eq!(db.products().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_declined_keeps_row() {
    let db = memory_store().await;
    db.products()
        .insert(&new_product("Gadget", 3, 1999, 5, None))
        .await
        .unwrap();

    let script = "v\n1\nd\nno\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains("Gadget has not been deleted."));
    assert_eq!(db.products().count().await.unwrap(), 1);
}

// =============================================================================
// Analysis
// =============================================================================

#[tokio::test]
async fn test_analysis_renders_report() {
    let db = memory_store().await;
    db.brands().insert("Trailblazer").await.unwrap();
    db.brands().insert("Northpeak").await.unwrap();
    db.products()
        .insert(&new_product("Sneakers", 2, 999, 5, Some(1)))
        .await
        .unwrap();
    db.products()
        .insert(&new_product("Boots", 9, 1299, 9, Some(2)))
        .await
        .unwrap();
    db.products()
        .insert(&new_product("Loafers", 4, 1299, 2, Some(2)))
        .await
        .unwrap();
    db.products()
        .insert(&new_product("Sandals", 7, 500, 14, None))
        .await
        .unwrap();

    let script = "a\n\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains(&format!("{:^50}", "PRODUCT ANALYSIS")));
    assert!(out.contains("Total products: 4"));
    assert!(out.contains("Most expensive: $12.99: Boots"));
    assert!(out.contains("Least expensive: $5.00: Sandals"));
    assert!(out.contains("Most common brand: Northpeak, Product count: 2"));
    assert!(out.contains("Least common brand: Trailblazer, Product count: 1"));
    assert!(out.contains("Average price (mean): $10.24"));
    assert!(out.contains("Mode price (most occurring value): $12.99"));
    assert!(out.contains("Median price (sorted middle value): $11.49"));
    assert!(out.contains("Price variance: $1066.13"));
    assert!(out.contains("Price standard deviation: $3.27"));
    assert!(out.contains("- Q1 (lower half price median): $6.25"));
    assert!(out.contains("- Q3 (upper half price median): $12.99"));
    assert!(out.contains("Interquartile range (IQR): $6.74"));
    assert!(out.contains("Press enter to return to the main menu."));
}

#[tokio::test]
async fn test_analysis_empty_store_shows_notice() {
    let db = memory_store().await;
    let out = run_script(&db, "a\nq\n", Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains("There are no products in the database to analyze."));
    assert!(!out.contains("Total products:"));
}

// =============================================================================
// Backup
// =============================================================================

#[tokio::test]
async fn test_backup_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("backup.csv");

    let db = memory_store().await;
    let brand = db.brands().insert("Apple").await.unwrap();
    db.products()
        .insert(&new_product("Gadget", 3, 1999, 5, Some(brand.brand_id)))
        .await
        .unwrap();
    db.products()
        .insert(&new_product("Mystery Box", 1, 10000, 7, None))
        .await
        .unwrap();

    let out = run_script(&db, "b\nq\n", &backup).await;

    assert!(out.contains(&format!("{:^50}", "BACKUP DATABASE")));
    assert!(out.contains("Backing up data..."));
    assert!(out.contains(&format!(
        "Product data has been backed-up to the file '{}'.",
        backup.display()
    )));

    let contents = std::fs::read_to_string(&backup).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("product_id,product_name,product_quantity,product_price,brand_id,date_updated")
    );
    assert_eq!(
        lines.next(),
        Some("1,Gadget,3,1999,1,2024-01-05T00:00:00+00:00")
    );
    assert_eq!(
        lines.next(),
        Some("2,Mystery Box,1,10000,,2024-01-07T00:00:00+00:00")
    );
}

// =============================================================================
// Listings
// =============================================================================

#[tokio::test]
async fn test_list_products_lines() {
    let db = memory_store().await;
    db.brands().insert("Apple").await.unwrap();
    db.products()
        .insert(&new_product("Gadget", 3, 1999, 5, Some(1)))
        .await
        .unwrap();
    db.products()
        .insert(&new_product("Orphan", 1, 250, 2, None))
        .await
        .unwrap();

    let script = "l\n\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains(&format!("{:^50}", "LIST ALL PRODUCTS")));
    assert!(out.contains("1: Gadget, Qty: 3, Price: $19.99, Brand: Apple, Updated: January 05, 2024"));
    assert!(out.contains("2: Orphan, Qty: 1, Price: $2.50, Brand: None, Updated: January 02, 2024"));
    assert!(out.contains("Press enter to return to the main menu."));
}

#[tokio::test]
async fn test_list_brands_counts() {
    let db = memory_store().await;
    db.brands().insert("Apple").await.unwrap();
    db.brands().insert("Banana").await.unwrap();
    db.products()
        .insert(&new_product("Gadget", 3, 1999, 5, Some(1)))
        .await
        .unwrap();
    db.products()
        .insert(&new_product("Widget", 2, 999, 6, Some(1)))
        .await
        .unwrap();

    let script = "r\n\nq\n";
    let out = run_script(&db, script, Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains(&format!("{:^50}", "LIST ALL BRANDS")));
    assert!(out.contains("1: Apple, Number of Products: 2"));
    assert!(out.contains("2: Banana, Number of Products: 0"));
}

// =============================================================================
// End of Input Mid-Flow
// =============================================================================

#[tokio::test]
async fn test_end_of_input_mid_flow_abandons_flow() {
    let db = memory_store().await;

    // Input runs dry at the quantity prompt.
    let out = run_script(&db, "n\nWidget\n", Path::new(UNUSED_BACKUP)).await;

    assert!(out.contains("Quantity: "));
    assert!(!out.contains("has been added"));
    assert_eq!(db.products().count().await.unwrap(), 0);
}
