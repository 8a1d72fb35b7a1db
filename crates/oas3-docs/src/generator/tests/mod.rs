mod catalog;
mod support;
