pub mod customer;
pub mod employee;
pub mod order;
pub mod order_item;
pub mod product;
pub mod production;
