//! The static resource registry. Every handler and query goes through these descriptions.

use crate::schema::{ColumnDef, FieldRule, FilterDef, FilterOp, Format, ResourceSchema};

pub static GALLERY_IMAGES: ResourceSchema = ResourceSchema {
    name: "gallery_image",
    table: "gallery_images",
    columns: &[
        ColumnDef::int("id"),
        ColumnDef::text("src"),
        ColumnDef::text("title"),
        ColumnDef::text("category_key"),
    ],
    primary_key: Some("id"),
    insertable: &["src", "title", "category_key"],
    required: &["src", "title", "category_key"],
    updatable: &["src", "title", "category_key"],
    filters: &[FilterDef {
        param: "category",
        column: "category_key",
        op: FilterOp::Equals,
    }],
    rules: &[FieldRule {
        column: "category_key",
        format: None,
        max_length: Some(100),
    }],
    public_order: r#""id" DESC"#,
    admin_order: r#""id" DESC"#,
    default_limit: None,
};

pub static GALLERY_CATEGORIES: ResourceSchema = ResourceSchema {
    name: "gallery_category",
    table: "gallery_categories",
    columns: &[ColumnDef::text("key"), ColumnDef::text("title")],
    primary_key: None,
    insertable: &[],
    required: &[],
    updatable: &[],
    filters: &[],
    rules: &[],
    public_order: r#"CASE WHEN "key" = 'all' THEN 0 ELSE 1 END, "title""#,
    admin_order: r#"CASE WHEN "key" = 'all' THEN 0 ELSE 1 END, "title""#,
    default_limit: None,
};

pub static EVENTS: ResourceSchema = ResourceSchema {
    name: "event",
    table: "events",
    columns: &[
        ColumnDef::int("id"),
        ColumnDef::text("title"),
        ColumnDef::date("date"),
        ColumnDef::text("location"),
        ColumnDef::text("category"),
        ColumnDef::text("image"),
    ],
    primary_key: Some("id"),
    insertable: &["title", "date", "location", "category", "image"],
    required: &["title"],
    updatable: &["title", "date", "location", "category", "image"],
    filters: &[FilterDef {
        param: "upcoming",
        column: "date",
        op: FilterOp::OnOrAfterToday,
    }],
    rules: &[],
    public_order: r#""date" ASC"#,
    admin_order: r#""id" DESC"#,
    default_limit: Some(3),
};

pub static BLOGS: ResourceSchema = ResourceSchema {
    name: "blog",
    table: "blogs",
    columns: &[
        ColumnDef::int("id"),
        ColumnDef::text("title"),
        ColumnDef::text("content"),
        ColumnDef::text("thumbnail"),
        ColumnDef::text("author"),
        ColumnDef::timestamp("created_at"),
    ],
    primary_key: Some("id"),
    insertable: &["title", "content", "thumbnail", "author"],
    required: &["title", "content"],
    updatable: &["title", "content", "thumbnail", "author"],
    filters: &[],
    rules: &[],
    public_order: r#""created_at" DESC"#,
    admin_order: r#""id" DESC"#,
    default_limit: None,
};

pub static TEAM_MEMBERS: ResourceSchema = ResourceSchema {
    name: "team_member",
    table: "team_members",
    columns: &[
        ColumnDef::int("id"),
        ColumnDef::text("name"),
        ColumnDef::text("role"),
        ColumnDef::text("level"),
        ColumnDef::text("image"),
        ColumnDef::text("description"),
    ],
    primary_key: Some("id"),
    insertable: &["name", "role", "level", "image", "description"],
    required: &["name", "level"],
    updatable: &["name", "role", "level", "image", "description"],
    filters: &[FilterDef {
        param: "level",
        column: "level",
        op: FilterOp::Equals,
    }],
    rules: &[FieldRule {
        column: "level",
        format: None,
        max_length: Some(100),
    }],
    public_order: r#""level", "id""#,
    admin_order: r#""level", "id""#,
    default_limit: None,
};

pub static CONTACT_MESSAGES: ResourceSchema = ResourceSchema {
    name: "contact_message",
    table: "contact_messages",
    columns: &[
        ColumnDef::int("id"),
        ColumnDef::text("name"),
        ColumnDef::text("email"),
        ColumnDef::text("phone"),
        ColumnDef::text("subject"),
        ColumnDef::text("message"),
        ColumnDef::timestamp("created_at"),
    ],
    primary_key: Some("id"),
    insertable: &["name", "email", "phone", "subject", "message"],
    required: &["name", "email", "message"],
    updatable: &[],
    filters: &[],
    rules: &[
        FieldRule {
            column: "email",
            format: Some(Format::Email),
            max_length: Some(254),
        },
        FieldRule {
            column: "name",
            format: None,
            max_length: Some(200),
        },
        FieldRule {
            column: "phone",
            format: None,
            max_length: Some(40),
        },
        FieldRule {
            column: "subject",
            format: None,
            max_length: Some(300),
        },
    ],
    public_order: r#""created_at" DESC"#,
    admin_order: r#""created_at" DESC"#,
    default_limit: None,
};

pub static ALL: [&ResourceSchema; 6] = [
    &GALLERY_IMAGES,
    &GALLERY_CATEGORIES,
    &EVENTS,
    &BLOGS,
    &TEAM_MEMBERS,
    &CONTACT_MESSAGES,
];
