//! # SQLite Schema & Seed Statements
//!
//! This module centralizes the DDL for the demo store and the deterministic
//! mock dataset used by the server at startup and by the test suites.

/// DDL for the application tables. Idempotent, safe to run on every startup.
pub const TABLE_CREATION_SQL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS api_customer (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        city TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS api_product (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        price REAL NOT NULL,
        category TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS api_order (
        id INTEGER PRIMARY KEY,
        customer_id INTEGER NOT NULL REFERENCES api_customer(id),
        product_id INTEGER NOT NULL REFERENCES api_product(id),
        order_date DATE NOT NULL,
        quantity INTEGER NOT NULL
    )",
];

/// Clears existing rows and inserts the mock dataset. Order matters: children
/// before parents on delete, parents before children on insert.
pub const SEED_DATA_SQL: &[&str] = &[
    "DELETE FROM api_order",
    "DELETE FROM api_product",
    "DELETE FROM api_customer",
    "INSERT INTO api_customer (id, name, email, city) VALUES
        (1, 'Abebe', 'abebe.0@example.com', 'Addis Ababa'),
        (2, 'Selam', 'selam.1@example.com', 'Axum'),
        (3, 'Bekele', 'bekele.2@example.com', 'Dire Dawa'),
        (4, 'Genet', 'genet.3@example.com', 'Bahir Dar'),
        (5, 'Dawit', 'dawit.4@example.com', 'Mekelle'),
        (6, 'Rahel', 'rahel.5@example.com', 'Axum'),
        (7, 'Hailu', 'hailu.6@example.com', 'Hawassa'),
        (8, 'Meron', 'meron.7@example.com', 'Gondar'),
        (9, 'Yonas', 'yonas.8@example.com', 'Adama'),
        (10, 'Saba', 'saba.9@example.com', 'Jimma'),
        (11, 'Tesfaye', 'tesfaye.10@example.com', 'Harar'),
        (12, 'Eden', 'eden.11@example.com', 'Dessie')",
    "INSERT INTO api_product (id, name, price, category) VALUES
        (1, 'Yirgacheffe Coffee Beans', 18.5, 'Coffee'),
        (2, 'Sidamo Coffee Beans', 17.0, 'Coffee'),
        (3, 'Ethiopian Tea Leaves', 6.75, 'Tea'),
        (4, 'Berbere Spice Blend', 4.25, 'Spices'),
        (5, 'Teff Flour 1kg', 7.2, 'Grains'),
        (6, 'Traditional Basket (Mesob)', 25.0, 'Crafts'),
        (7, 'Handwoven Shawl', 22.5, 'Textiles'),
        (8, 'Sheba Honey Jar', 8.5, 'Food'),
        (9, 'Clay Coffee Pot (Jebena)', 14.25, 'Home'),
        (10, 'Amharic Phrasebook', 9.6, 'Books')",
    "INSERT INTO api_order (id, customer_id, product_id, order_date, quantity) VALUES
        (1, 1, 1, '2025-06-02', 2),
        (2, 2, 4, '2025-06-05', 1),
        (3, 3, 2, '2025-06-09', 3),
        (4, 5, 7, '2025-06-12', 1),
        (5, 6, 1, '2025-06-15', 4),
        (6, 8, 9, '2025-06-21', 2),
        (7, 2, 10, '2025-06-28', 1),
        (8, 10, 3, '2025-07-03', 5),
        (9, 11, 8, '2025-07-07', 2),
        (10, 4, 6, '2025-07-11', 1),
        (11, 7, 5, '2025-07-19', 8),
        (12, 12, 2, '2025-07-24', 2)",
];
