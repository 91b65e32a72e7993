mod client;
mod core;
mod items;
mod utils;

pub use core::{
    authorize_hubspot, get_hubspot_credentials, get_items_hubspot, oauth2callback_hubspot,
};
