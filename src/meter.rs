pub mod confusion;
pub mod multilabel;
pub mod value;

pub use confusion::ConfusionMeter;
pub use multilabel::MultiLabelConfusionMeter;
pub use value::ConfusionValue;
