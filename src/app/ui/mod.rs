mod controls;
mod library;
mod panels;
