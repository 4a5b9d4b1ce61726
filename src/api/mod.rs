//! API service modules for Loyverse endpoints.
//!
//! Each service wraps one resource and exposes only the operations that
//! resource supports. Get one from [`LoyverseClient`](crate::LoyverseClient),
//! e.g. `client.items()`.

mod resource;

mod categories;
mod customers;
mod discounts;
mod employees;
mod inventory;
mod items;
mod modifiers;
mod receipts;
mod webhooks;

pub use categories::CategoriesService;
pub use customers::{CustomersQuery, CustomersService};
pub use discounts::DiscountsService;
pub use employees::EmployeesService;
pub use inventory::{InventoryQuery, InventoryService};
pub use items::{ItemsQuery, ItemsService};
pub use modifiers::ModifiersService;
pub use receipts::{ReceiptsQuery, ReceiptsService};
pub use resource::UpdatedAtQuery;
pub use webhooks::WebhooksService;
