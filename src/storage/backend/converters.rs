use crate::storage::LinkRow;
use migration::entities::link;

pub fn model_to_row(model: link::Model) -> LinkRow {
    LinkRow {
        keyword: model.keyword,
        url: model.url,
        title: model.title,
        timestamp: model.timestamp,
        ip: model.ip,
        clicks: model.clicks.max(0),
    }
}

pub fn row_to_active_model(row: &LinkRow) -> link::ActiveModel {
    use sea_orm::ActiveValue::Set;

    link::ActiveModel {
        keyword: Set(row.keyword.clone()),
        url: Set(row.url.clone()),
        title: Set(row.title.clone()),
        timestamp: Set(row.timestamp),
        ip: Set(row.ip.clone()),
        clicks: Set(row.clicks.max(0)),
    }
}
