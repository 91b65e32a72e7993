use crate::hubspot::types::{CrmObject, CrmObjectKind};
use crate::integration_item::IntegrationItem;

const ROOT_ID: &str = "hubspot_crm";
const ROOT_NAME: &str = "HubSpot CRM";
const ROOT_TYPE: &str = "CRM";

/// Flatten fetched CRM collections into the item tree.
///
/// The root comes first, then each list followed by its objects, in the order
/// the sections are given.
pub(super) fn build_integration_items(
    sections: Vec<(CrmObjectKind, Vec<CrmObject>)>,
) -> Vec<IntegrationItem> {
    let mut root = IntegrationItem::new(ROOT_ID, ROOT_TYPE, ROOT_NAME).as_directory();
    root.children = Some(
        sections
            .iter()
            .map(|(kind, _)| kind.list_id().to_string())
            .collect(),
    );

    let mut items = vec![root];

    for (kind, objects) in sections {
        let mut list = IntegrationItem::new(kind.list_id(), kind.list_type(), kind.list_name())
            .as_directory()
            .with_parent(ROOT_ID, ROOT_NAME);
        list.children = Some(objects.iter().map(|o| kind.item_id(&o.id)).collect());
        items.push(list);

        items.extend(objects.iter().map(|object| object_item(kind, object)));
    }

    items
}

fn object_item(kind: CrmObjectKind, object: &CrmObject) -> IntegrationItem {
    IntegrationItem::new(kind.item_id(&object.id), kind.item_type(), object_name(kind, object))
        .with_parent(kind.list_id(), kind.list_name())
        .with_times(object.created_at, object.updated_at)
}

fn object_name(kind: CrmObjectKind, object: &CrmObject) -> String {
    match kind {
        CrmObjectKind::Contacts => {
            let full_name = [object.property("firstname"), object.property("lastname")]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            if !full_name.is_empty() {
                full_name
            } else {
                object
                    .property("email")
                    .unwrap_or("Unnamed Contact")
                    .to_string()
            }
        }
        CrmObjectKind::Companies => object
            .property("name")
            .unwrap_or("Unnamed Company")
            .to_string(),
        CrmObjectKind::Deals => object
            .property("dealname")
            .unwrap_or("Unnamed Deal")
            .to_string(),
    }
}
