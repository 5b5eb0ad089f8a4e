pub mod google_fonts;
