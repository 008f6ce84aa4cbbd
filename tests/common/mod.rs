pub mod sample_image;
