//! Built-in catalog served when no document store is configured, and used to
//! seed an empty store.

use crate::product::Product;

pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new("Industrial Circuit Breaker 3P 100A", "Power Distribution")
            .brand("ProGuard")
            .description(
                "Rugged molded-case circuit breaker for industrial panels with high interrupt capacity.",
            )
            .specs([
                "Rated current: 100A",
                "Poles: 3",
                "Voltage: 415VAC",
                "Breaking capacity: 36kA",
                "Compliance: IEC 60947-2",
            ])
            .images([
                "https://images.unsplash.com/photo-1581094794329-c8112a89af12?q=80&w=1200&auto=format&fit=crop",
            ])
            .featured(true),
        Product::new("Metallic Cable Tray Ladder Type", "Cable Management")
            .slug("metallic-cable-tray-ladder")
            .brand("SteelFlex")
            .description("Heavy-duty galvanized steel ladder cable tray for factories and plants.")
            .specs([
                "Material: GI steel",
                "Width: 300mm",
                "Height: 100mm",
                "Finish: Hot-dip galvanized",
                "Accessories: Bends, tees, reducers",
            ])
            .images([
                "https://images.unsplash.com/photo-1581090464777-f3220bbe1b8b?q=80&w=1200&auto=format&fit=crop",
            ])
            .featured(true),
        Product::new("Programmable Logic Controller (PLC)", "Automation")
            .brand("AutoCore")
            .description("Compact PLC for machine automation with Ethernet and Modbus.")
            .specs([
                "I/O: 24 DI, 16 DO, 4 AI",
                "Protocols: Modbus TCP/RTU",
                "Programming: Ladder/Structured Text",
                "Comms: 2x RS485, 1x Ethernet",
            ])
            .images([
                "https://images.unsplash.com/photo-1581092578034-95c2a5b9c9d7?q=80&w=1200&auto=format&fit=crop",
            ]),
    ]
}
