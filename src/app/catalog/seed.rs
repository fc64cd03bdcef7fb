//! 示例数据

use tracing::info;

use super::{
    model::Product,
    repository::{ProductRepository, RepositoryResult},
};

pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new("IPhone X", "Smart Phone", 950.00)
            .with_summary("5.8 英寸全面屏")
            .with_description("A11 仿生芯片，面容 ID，双摄像头。")
            .with_image_file("product-1.png"),
        Product::new("Samsung 10", "Smart Phone", 840.00)
            .with_summary("曲面屏旗舰")
            .with_description("屏下指纹识别，三摄像头。")
            .with_image_file("product-2.png"),
        Product::new("Huawei Plus", "White Appliances", 650.00)
            .with_summary("大容量双开门冰箱")
            .with_description("变频压缩机，风冷无霜。")
            .with_image_file("product-3.png"),
        Product::new("Xiaomi Mi 9", "White Appliances", 470.00)
            .with_summary("滚筒洗衣机")
            .with_description("10 公斤容量，智能投放。")
            .with_image_file("product-4.png"),
        Product::new("HTC U11+ Plus", "Smart Phone", 380.00)
            .with_summary("可挤压边框")
            .with_description("6 英寸屏幕，IP68 防水。")
            .with_image_file("product-5.png"),
        Product::new("LG G7 ThinQ", "Home Kitchen", 240.00)
            .with_summary("智能微波炉")
            .with_description("变频加热，语音控制。")
            .with_image_file("product-6.png"),
    ]
}

/// 集合为空时写入示例数据，返回写入的条数
pub async fn seed_if_empty(repository: &dyn ProductRepository) -> RepositoryResult<usize> {
    if !repository.list_all().await?.is_empty() {
        info!("商品集合已有数据，跳过示例数据");
        return Ok(0);
    }

    let mut inserted = 0;
    for product in sample_products() {
        repository.create(product).await?;
        inserted += 1;
    }

    info!("✅ 已写入 {} 个示例商品", inserted);
    Ok(inserted)
}
