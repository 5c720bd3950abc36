pub mod amqp;
pub mod observability;
pub mod tls;
