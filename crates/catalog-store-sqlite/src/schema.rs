//! SQL schema for the catalog SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision; future migrations will be gated on that number.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    category    TEXT    NOT NULL,
    price       REAL    NOT NULL,   -- rounded to cents on write
    image_url   TEXT,
    attributes  TEXT    NOT NULL DEFAULT '{}'
                CHECK (json_valid(attributes) AND json_type(attributes) = 'object'),
    tags        TEXT    NOT NULL DEFAULT '[]'
                CHECK (json_valid(tags) AND json_type(tags) = 'array'),
    description TEXT    NOT NULL DEFAULT '',
    created_at  TEXT    NOT NULL    -- RFC 3339 UTC, fixed width; sorts lexically
);

CREATE INDEX IF NOT EXISTS products_category_idx ON products(category);
CREATE INDEX IF NOT EXISTS products_created_idx  ON products(created_at);

-- Full-text index over `description`, stored externally in `products`.
CREATE VIRTUAL TABLE IF NOT EXISTS products_fts USING fts5(
    description,
    content       = 'products',
    content_rowid = 'id',
    tokenize      = 'porter unicode61'
);

CREATE TRIGGER IF NOT EXISTS products_fts_insert AFTER INSERT ON products BEGIN
    INSERT INTO products_fts(rowid, description) VALUES (new.id, new.description);
END;

CREATE TRIGGER IF NOT EXISTS products_fts_delete AFTER DELETE ON products BEGIN
    INSERT INTO products_fts(products_fts, rowid, description)
    VALUES ('delete', old.id, old.description);
END;

CREATE TRIGGER IF NOT EXISTS products_fts_update AFTER UPDATE OF description ON products BEGIN
    INSERT INTO products_fts(products_fts, rowid, description)
    VALUES ('delete', old.id, old.description);
    INSERT INTO products_fts(rowid, description) VALUES (new.id, new.description);
END;

PRAGMA user_version = 1;
";

/// Drops every catalog table. Triggers go with their table.
pub const DROP_SCHEMA: &str = "
DROP TABLE IF EXISTS products_fts;
DROP TABLE IF EXISTS products;
";
