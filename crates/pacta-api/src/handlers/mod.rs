pub mod auth_pages;
pub mod contract_delete;
pub mod contract_download;
pub mod contract_export;
pub mod contract_list;
pub mod contract_upload;
pub mod generate;
pub mod health;
pub mod sign;
