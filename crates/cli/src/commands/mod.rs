pub(crate) mod detect;
pub(crate) mod migrate;
pub(crate) mod run;
pub(crate) mod serve;
